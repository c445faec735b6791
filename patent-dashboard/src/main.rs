//! Patent Cluster Dashboard
//!
//! Explores per-firm patent counts across the clusters of several
//! clustering runs. The sidebar picks the run (number of clusters) and one
//! of three pages:
//! - See all Clusters: distinct firms per cluster (first 50 clusters)
//! - Firm Selection: patents of one firm in each cluster
//! - Cluster Selection: patents of each firm in one cluster
//!
//! Data flow:
//! 1. `build.rs` copies `patent_counts.csv` and `cluster_labels.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds these CSVs into the WASM binary.
//! 3. On mount, the CSVs are loaded into an in-memory SQLite database. Any
//!    load failure is fatal and shown instead of the dashboard.
//! 4. Every sidebar change re-runs the router over the loaded snapshot and
//!    re-renders the bar chart.

use anyhow::Context;
use dioxus::prelude::*;
use pcd_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, Sidebar,
};
use pcd_chart_ui::js_bridge;
use pcd_chart_ui::state::{AppError, AppState};
use pcd_data::router::{self, RenderedView};
use pcd_db::Database;

/// Per-firm patent counts for every clustering run.
const PATENT_COUNTS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/patent_counts.csv"));
/// Keyword labels for every cluster of every clustering run.
const CLUSTER_LABELS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/cluster_labels.csv"));

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "patent-cluster-chart";

const D3_SRC: &str = "https://cdn.jsdelivr.net/npm/d3@7";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("patent-dashboard-root"))
        .launch(App);
}

/// Build the read-only snapshot from the two CSV tables.
fn load_database(patent_counts_csv: &str, cluster_labels_csv: &str) -> anyhow::Result<Database> {
    let db = Database::new().context("Database initialization failed")?;
    db.load_cluster_labels(cluster_labels_csv)
        .context("Failed to load cluster labels")?;
    db.load_patent_counts(patent_counts_csv)
        .context("Failed to load patent counts")?;
    db.integrity_report()?;
    Ok(db)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut view = use_signal(|| None::<RenderedView>);

    // Load both tables once on mount
    use_effect(move || {
        match load_database(PATENT_COUNTS_CSV, CLUSTER_LABELS_CSV) {
            Ok(db) => {
                match db.query_granularities() {
                    Ok(granularities) => {
                        if let Some(first) = granularities.first() {
                            state.granularity.set(*first);
                        }
                        state.granularities.set(granularities);
                    }
                    Err(e) => {
                        log::error!("Failed to list clustering runs: {:#}", e);
                        state.error.set(Some(AppError::Load(format!(
                            "Failed to list clustering runs: {:#}",
                            e
                        ))));
                        state.loading.set(false);
                        return;
                    }
                }
                state.db.set(Some(db));
                state.refresh_key_options();
                state.loading.set(false);
            }
            Err(e) => {
                log::error!("{:#}", e);
                state.error.set(Some(AppError::Load(format!("{:#}", e))));
                state.loading.set(false);
            }
        }
    });

    // Re-route and re-render on every sidebar change
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        if state.error.read().is_some() {
            return;
        }

        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };

        let selection = state.selection();
        match router::route(&db, &selection) {
            Ok(rendered) => {
                js_bridge::init_charts();
                js_bridge::render_bar_chart(CHART_ID, &rendered.chart);
                view.set(Some(rendered));
            }
            Err(e) => {
                log::error!("Failed to render {:?}: {:#}", selection, e);
                js_bridge::destroy_chart(CHART_ID);
                state.error.set(Some(AppError::View(format!("{:#}", e))));
            }
        }
    });

    rsx! {
        document::Script { src: D3_SRC }
        div {
            style: "display: flex; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if let Some(err) = (state.error)() {
                div {
                    style: "padding: 16px; flex: 1;",
                    ErrorDisplay { error: err }
                }
            } else if (state.loading)() {
                div {
                    style: "flex: 1;",
                    LoadingSpinner {}
                }
            } else {
                Sidebar {}
                main {
                    style: "flex: 1; padding: 16px; min-width: 0;",
                    if let Some(rendered) = view() {
                        ChartHeader {
                            title: rendered.title.clone(),
                            subheader: rendered.subheader.clone(),
                            emphasis: rendered.emphasis.clone().unwrap_or_default(),
                        }
                        ChartContainer {
                            id: CHART_ID.to_string(),
                            height: rendered.chart.height,
                            empty: rendered.chart.is_empty(),
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcd_db::LoadError;

    const COUNTS: &str = "\
firm,cluster_id,n_patents,n_clusters
Acme Corp,1,3,5
Acme Corp,2,7,5
";
    const LABELS: &str = "\
cluster_id,words,n_clusters
1,\"battery, cell\",5
2,\"engine, motor\",5
";

    #[test]
    fn load_database_from_both_tables() {
        let db = load_database(COUNTS, LABELS).unwrap();
        assert_eq!(db.query_granularities().unwrap(), vec![5]);
        assert_eq!(db.query_firm_clusters(5, "Acme Corp").unwrap().len(), 2);
    }

    #[test]
    fn missing_table_is_fatal() {
        let err = load_database("", LABELS).err().expect("load should fail");
        assert!(format!("{:#}", err).starts_with("Failed to load patent counts"));
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Empty { .. })
        ));
    }

    #[test]
    fn malformed_labels_are_fatal() {
        let err = load_database(COUNTS, "cluster_id,n_clusters\n1,5\n")
            .err()
            .expect("load should fail");
        assert!(format!("{:#}", err).starts_with("Failed to load cluster labels"));
    }

    #[test]
    fn bundled_fixtures_load() {
        let db = load_database(PATENT_COUNTS_CSV, CLUSTER_LABELS_CSV).unwrap();
        let report = db.integrity_report().unwrap();
        assert!(report.patent_rows > 0);
        assert!(report.is_consistent());
    }
}
