//! Radio group choosing the page.

use crate::state::AppState;
use dioxus::prelude::*;
use pcd_data::router::PageMode;

#[component]
pub fn ModeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.mode)();

    rsx! {
        fieldset {
            style: "margin: 8px 0; border: none; padding: 0;",
            legend {
                style: "font-weight: bold; margin-bottom: 4px;",
                "Go to"
            }
            for mode in PageMode::ALL {
                label {
                    style: "display: block; margin: 2px 0;",
                    input {
                        r#type: "radio",
                        name: "page-mode",
                        value: mode.label(),
                        checked: mode == current,
                        onchange: move |evt: Event<FormData>| {
                            if let Some(mode) = PageMode::from_label(&evt.value()) {
                                state.mode.set(mode);
                            }
                        },
                    }
                    " "
                    {mode.label()}
                }
            }
        }
    }
}
