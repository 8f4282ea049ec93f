//! Canvas container with loading state.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id of the canvas (Chart.js draws into it)
    pub canvas_id: String,
    /// Whether the chart is still loading
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 320)]
    pub min_height: u32,
}

/// A canvas for Chart.js with a loading overlay.
///
/// The canvas is rendered even while loading so it exists by the time the
/// chart controller is constructed.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            canvas {
                id: "{props.canvas_id}",
            }
        }
    }
}
