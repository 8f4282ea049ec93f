//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals of a chart page. The chart
//! controllers themselves live outside Dioxus; these signals only drive
//! what the page shows around the canvas.

use dioxus::prelude::*;

/// One selectable period button.
#[derive(Clone, PartialEq, Debug)]
pub struct PeriodOption {
    /// Key passed to the controller, e.g. `weekly`
    pub key: String,
    /// Button caption, e.g. `Weekly`
    pub title: String,
}

impl PeriodOption {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
        }
    }
}

/// Shared state for SmartSales chart pages.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the chart is still being set up
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Buttons offered to the user
    pub periods: Signal<Vec<PeriodOption>>,
    /// Key of the period currently drawn
    pub active_period: Signal<String>,
    /// Forecast growth for the active period, in percent
    pub growth: Signal<Option<f64>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            periods: Signal::new(Vec::new()),
            active_period: Signal::new(String::new()),
            growth: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
