//! Main panel header: view title, descriptive subheader and an optional
//! emphasized line.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    #[props(default = String::new())]
    pub subheader: String,
    /// Rendered after the subheader at 1.5em
    #[props(default = String::new())]
    pub emphasis: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h1 {
                style: "margin: 0 0 8px 0; font-size: 24px;",
                "{props.title}"
            }
            if !props.subheader.is_empty() {
                p {
                    style: "margin: 0; font-size: 13px; color: #666;",
                    "{props.subheader}"
                }
            }
            if !props.emphasis.is_empty() {
                p {
                    style: "margin: 4px 0 0 0;",
                    span { style: "font-size: 1.5em;", "{props.emphasis}" }
                }
            }
        }
    }
}
