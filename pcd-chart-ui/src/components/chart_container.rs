//! Chart container sized to the chart it will hold.

use dioxus::prelude::*;
use pcd_data::chart::BASE_HEIGHT;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (D3 will render into this)
    pub id: String,
    /// Height of the chart in pixels
    #[props(default = BASE_HEIGHT)]
    pub height: u32,
    /// Whether the chart has no bars
    #[props(default = false)]
    pub empty: bool,
}

/// A container div for the D3.js bar chart.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.height
    );

    rsx! {
        div {
            style: "{style}",
            if props.empty {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "No patents match this selection."
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
