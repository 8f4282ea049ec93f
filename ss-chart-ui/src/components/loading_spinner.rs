//! Loading spinner component.

use dioxus::prelude::*;

/// Shown while the chart is set up.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 24px; color: #666;",
            "Loading data..."
        }
    }
}
