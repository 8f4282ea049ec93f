//! Typed wrappers around the Chart.js shim.
//!
//! `assets/js/sales-chart.js` is embedded at compile time and evaluated
//! once; it exposes `window.ssCreateChart`, `ssSetLabels`,
//! `ssSetSeriesData` and `ssRedraw`, keyed by canvas id. Chart.js itself
//! is loaded by the page with a regular `<script>` tag.

use ss_core::chart::{self, ChartBackend, ChartConfig, ChartHandle};
use ss_core::{CoreError, Result};
use wasm_bindgen::prelude::*;

static SALES_CHART_JS: &str = include_str!("../assets/js/sales-chart.js");

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = window, js_name = ssCreateChart)]
    fn ss_create_chart(canvas_id: &str, config_json: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = window, js_name = ssSetLabels)]
    fn ss_set_labels(canvas_id: &str, labels_json: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = window, js_name = ssSetSeriesData)]
    fn ss_set_series_data(canvas_id: &str, dataset: u32, data_json: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = window, js_name = ssRedraw)]
    fn ss_redraw(canvas_id: &str) -> std::result::Result<(), JsValue>;
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SmartSales JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the chart shim unless a previous call already did.
pub fn load_chart_scripts() {
    call_js(&format!("if (!window.__ssChartsReady) {{ {} }}", SALES_CHART_JS));
}

fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Chart.js rendering backend.
pub struct ChartJsBackend;

impl ChartJsBackend {
    /// Load the shim and return the backend.
    pub fn new() -> Self {
        load_chart_scripts();
        Self
    }
}

impl Default for ChartJsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBackend for ChartJsBackend {
    type Handle = ChartJsHandle;

    fn construct(&self, config: &ChartConfig) -> Result<ChartJsHandle> {
        let config_json = config.to_chartjs().to_string();
        ss_create_chart(&config.canvas_id, &config_json).map_err(|e| {
            CoreError::Render(format!("#{}: {}", config.canvas_id, js_error_message(&e)))
        })?;
        Ok(ChartJsHandle {
            canvas_id: config.canvas_id.clone(),
        })
    }
}

/// A chart living on one canvas. Calls that throw in JS are logged and dropped.
pub struct ChartJsHandle {
    canvas_id: String,
}

impl ChartJsHandle {
    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    /// JSON for the shim. On failure the call is skipped, not sent empty.
    fn to_json<T: serde::Serialize + ?Sized>(&self, op: &str, payload: &T) -> Option<String> {
        match chart::update_payload(payload) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("chart #{}: {} skipped: {}", self.canvas_id, op, e);
                None
            }
        }
    }

    fn report(&self, op: &str, result: std::result::Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("chart #{}: {} failed: {}", self.canvas_id, op, js_error_message(&e));
        }
    }
}

impl ChartHandle for ChartJsHandle {
    fn set_labels(&mut self, labels: &[String]) {
        if let Some(labels_json) = self.to_json("setLabels", labels) {
            self.report("setLabels", ss_set_labels(&self.canvas_id, &labels_json));
        }
    }

    fn set_series_data(&mut self, dataset: usize, values: &[f64]) {
        let Some(data_json) = self.to_json("setSeriesData", values) else {
            return;
        };
        let index = u32::try_from(dataset).unwrap_or(u32::MAX);
        self.report("setSeriesData", ss_set_series_data(&self.canvas_id, index, &data_json));
    }

    fn redraw(&mut self) {
        self.report("redraw", ss_redraw(&self.canvas_id));
    }
}
