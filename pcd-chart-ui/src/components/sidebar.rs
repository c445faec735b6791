//! Sidebar: run dropdown, page radio group and the key dropdown of the page.

use crate::components::{ClusterSelector, FirmSelector, GranularitySelector, ModeSelector};
use crate::state::AppState;
use dioxus::prelude::*;
use pcd_data::router::PageMode;

#[component]
pub fn Sidebar() -> Element {
    let state = use_context::<AppState>();
    let mode = (state.mode)();
    let granularity = (state.granularity)();

    rsx! {
        aside {
            style: "flex: 0 0 260px; padding: 16px; background: #F5F5F5; border-right: 1px solid #E0E0E0; min-height: 100vh; box-sizing: border-box;",
            GranularitySelector {}
            h2 {
                style: "margin: 12px 0; font-size: 18px;",
                "Total Number of Clusters: {granularity}"
            }
            ModeSelector {}
            if mode == PageMode::FirmSelection {
                FirmSelector {}
            } else if mode == PageMode::ClusterSelection {
                ClusterSelector {}
            }
        }
    }
}
