//! Page contract: element ids, chart styling, delays and labels.
//!
//! Every field has a default matching the SmartSales templates. A page can
//! override any of them by embedding a `smartsales-config` JSON element,
//! e.g. `{"otp": {"redirectDelayMs": 5000}}`.

use crate::embedded::{read_json, EmbeddedData};
use crate::error::Result;
use crate::period::Period;
use serde::Deserialize;

/// Id of the optional embedded element carrying config overrides.
pub const CONFIG_SOURCE_ID: &str = "smartsales-config";

/// Configuration for all controllers of a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub trend: TrendChartConfig,
    pub forecast: ForecastChartConfig,
    pub otp: OtpConfig,
}

impl PageConfig {
    /// Defaults, overridden by the page's `smartsales-config` element if present.
    pub fn from_embedded<S: EmbeddedData + ?Sized>(source: &S) -> Result<Self> {
        read_json(source, CONFIG_SOURCE_ID)
    }
}

/// Styling of the single line dataset each chart draws.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetStyle {
    pub label: String,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub fill: bool,
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self {
            label: "Revenue".to_string(),
            border_color: "black".to_string(),
            background_color: "rgba(0,0,0,0.1)".to_string(),
            tension: 0.4,
            fill: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendChartConfig {
    /// Canvas the chart is drawn on
    pub canvas_id: String,
    /// Period shown before any button is pressed
    pub initial_period: Period,
    pub style: DatasetStyle,
}

impl Default for TrendChartConfig {
    fn default() -> Self {
        Self {
            canvas_id: "revenueChart".to_string(),
            initial_period: Period::Daily,
            style: DatasetStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastChartConfig {
    pub canvas_id: String,
    /// Embedded element holding the period → values mapping
    pub data_source_id: String,
    pub initial_period: String,
    /// Button order; keys missing from the data are skipped
    pub periods: Vec<String>,
    /// X axis labels of the comparison view
    pub point_labels: Vec<String>,
    pub style: DatasetStyle,
}

impl Default for ForecastChartConfig {
    fn default() -> Self {
        Self {
            canvas_id: "forecastChart".to_string(),
            data_source_id: "forecast-data".to_string(),
            initial_period: "day".to_string(),
            periods: vec!["day".to_string(), "week".to_string(), "month".to_string()],
            point_labels: vec!["Current".to_string(), "Forecast".to_string()],
            style: DatasetStyle {
                label: "Forecast".to_string(),
                border_color: "blue".to_string(),
                background_color: "rgba(0,0,255,0.1)".to_string(),
                ..DatasetStyle::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtpConfig {
    /// CSS selector of the OTP form
    pub form_selector: String,
    pub spinner_id: String,
    pub submit_id: String,
    pub resend_id: String,
    pub countdown_id: String,
    /// CSS selector of the banner the server renders on success
    pub success_selector: String,
    /// Class that hides an element
    pub hidden_class: String,
    pub login_path: String,
    pub redirect_delay_ms: u64,
    pub countdown_seconds: u32,
    pub tick_ms: u64,
    /// Resend button caption once the countdown expires
    pub resend_label: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            form_selector: "form".to_string(),
            spinner_id: "spinner".to_string(),
            submit_id: "submit-btn".to_string(),
            resend_id: "resendBtn".to_string(),
            countdown_id: "countdown".to_string(),
            success_selector: ".alert-success".to_string(),
            hidden_class: "d-none".to_string(),
            login_path: "/accounts/login/".to_string(),
            redirect_delay_ms: 3000,
            countdown_seconds: 60,
            tick_ms: 1000,
            resend_label: "Resend OTP".to_string(),
        }
    }
}
