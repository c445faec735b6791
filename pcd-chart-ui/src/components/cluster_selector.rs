//! Dropdown selector for choosing a cluster by its keyword label.

use crate::state::AppState;
use dioxus::prelude::*;

/// Cluster dropdown for the cluster page. The option value is the label
/// text, which is what the cluster view filters on.
#[component]
pub fn ClusterSelector() -> Element {
    let mut state = use_context::<AppState>();
    let labels = state.cluster_words.read().clone();
    let selected = (state.selected_cluster)();

    let on_change = move |evt: Event<FormData>| {
        state.selected_cluster.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "cluster-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Select a cluster:"
            }
            select {
                id: "cluster-select",
                style: "width: 100%;",
                onchange: on_change,
                for words in labels.iter() {
                    option {
                        value: "{words}",
                        selected: *words == selected,
                        "{words}"
                    }
                }
            }
        }
    }
}
