//! Fatal error panel.

use crate::state::AppError;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub error: AppError,
}

/// Shown instead of the dashboard when the data cannot be loaded or a view
/// cannot be built. There is no retry; reloading the page starts over.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "The dashboard cannot continue: " }
            "{props.error.message()}"
            if let Some(hint) = props.error.hint() {
                p {
                    style: "margin: 8px 0 0 0; font-size: 12px; color: #8E2424;",
                    "{hint}"
                }
            }
        }
    }
}
