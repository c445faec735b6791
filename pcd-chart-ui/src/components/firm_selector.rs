//! Dropdown selector for choosing a firm.

use crate::state::AppState;
use dioxus::prelude::*;

/// Firm dropdown for the firm page. Lists the firms of the selected run.
#[component]
pub fn FirmSelector() -> Element {
    let mut state = use_context::<AppState>();
    let firms = state.firms.read().clone();
    let selected = (state.selected_firm)();

    let on_change = move |evt: Event<FormData>| {
        state.selected_firm.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "firm-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Select a firm:"
            }
            select {
                id: "firm-select",
                style: "width: 100%;",
                onchange: on_change,
                for firm in firms.iter() {
                    option {
                        value: "{firm}",
                        selected: *firm == selected,
                        "{firm}"
                    }
                }
            }
        }
    }
}
