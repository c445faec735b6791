//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js bar chart lives in `assets/js/*.js` and is loaded at runtime.
//! The scripts are evaluated as globals (no ES modules) and exposed via
//! `window.*`. This module serializes chart data and calls those globals.

use pcd_data::chart::BarChart;

// Embed the chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('PCD JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart scripts define `renderBarChart(...)` and the tooltip helpers
/// with `function` declarations. They are evaluated at global scope via an
/// indirect `eval()` once D3 is ready and then promoted to `window.*`.
/// Calling this more than once is harmless.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, BAR_CHART_JS].join("\n");

    let store_js = format!(
        "if (!window.__pcdChartsReady) {{ window.__pcdChartScripts = {}; }}",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__pcdChartsReady || window.__pcdChartsInit) return;
            window.__pcdChartsInit = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__pcdChartScripts);
                    delete window.__pcdChartScripts;
                    if (typeof renderBarChart !== 'undefined') window.renderBarChart = renderBarChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__pcdChartsReady = true;
                    console.log('PCD charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Escape a JSON payload for embedding in a single-quoted JS string literal.
fn escape_single_quoted(json: &str) -> String {
    json.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "")
}

/// Render a horizontal bar chart into `container_id`.
///
/// Polls until D3.js is loaded, the chart scripts are initialized and the
/// container element exists.
pub fn render_bar_chart(container_id: &str, chart: &BarChart) {
    let data_json = chart.data_json().unwrap_or_else(|e| {
        log::error!("Failed to serialize chart bars: {}", e);
        "[]".to_string()
    });
    let config_json = chart.config_json().unwrap_or_else(|e| {
        log::error!("Failed to serialize chart config: {}", e);
        "{}".to_string()
    });
    let escaped_data = escape_single_quoted(&data_json);
    let escaped_config = escape_single_quoted(&config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__pcdChartsReady &&
                    typeof window.renderBarChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderBarChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[PCD] renderBarChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

#[cfg(test)]
mod tests {
    use super::{escape_single_quoted, BAR_CHART_JS, TOOLTIP_JS};

    #[test]
    fn escapes_quotes_and_backslashes() {
        let json = r#"[{"category":"Smith's \"Co\"","value":1}]"#;
        let escaped = escape_single_quoted(json);
        assert_eq!(
            escaped,
            r#"[{"category":"Smith\'s \\"Co\\"","value":1}]"#
        );
    }

    #[test]
    fn strips_newlines() {
        assert_eq!(escape_single_quoted("{\n\"a\":1\n}"), "{\"a\":1}");
    }

    #[test]
    fn tooltip_sets_data_as_text() {
        // firm names and cluster words come from the CSVs
        for script in [TOOLTIP_JS, BAR_CHART_JS] {
            assert!(!script.contains(".html("));
            assert!(!script.contains("innerHTML = d"));
            assert!(!script.contains("<strong>"));
        }
        assert!(TOOLTIP_JS.contains(".text(function(f) { return ': ' + f[1]; })"));
        assert!(BAR_CHART_JS.contains("[config.categoryColumn, d.category]"));
    }
}
