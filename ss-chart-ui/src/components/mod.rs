//! Reusable Dioxus RSX components for SmartSales chart pages.

mod chart_container;
mod chart_header;
mod error_display;
mod loading_spinner;
mod period_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use period_selector::PeriodSelector;
