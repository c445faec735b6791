//! Dropdown selector for the clustering run.

use crate::state::AppState;
use dioxus::prelude::*;

/// Clustering run dropdown.
/// Changing the run refills the firm and cluster dropdowns.
#[component]
pub fn GranularitySelector() -> Element {
    let mut state = use_context::<AppState>();
    let granularities = state.granularities.read().clone();
    let selected = (state.granularity)();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<i64>() {
        Ok(value) => {
            state.granularity.set(value);
            state.refresh_key_options();
        }
        Err(e) => log::warn!("Ignoring clustering run {:?}: {}", evt.value(), e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "granularity-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Select the number of clusters:"
            }
            select {
                id: "granularity-select",
                style: "width: 100%;",
                onchange: on_change,
                for n in granularities.iter() {
                    option {
                        value: "{n}",
                        selected: *n == selected,
                        "{n}"
                    }
                }
            }
        }
    }
}
