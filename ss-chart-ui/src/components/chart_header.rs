//! Chart header component with title and an optional note.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Line under the title, e.g. the forecast growth
    #[props(default = String::new())]
    pub note: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.note.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.note}"
                }
            }
        }
    }
}
