//! Contract between the controllers and a chart rendering backend.

use crate::config::DatasetStyle;
use crate::error::{CoreError, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Everything needed to construct a line chart with one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas element the backend draws into
    pub canvas_id: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub style: DatasetStyle,
}

impl ChartConfig {
    /// Chart.js configuration object for this chart.
    pub fn to_chartjs(&self) -> Value {
        json!({
            "type": "line",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": self.style.label,
                    "data": self.values,
                    "borderColor": self.style.border_color,
                    "backgroundColor": self.style.background_color,
                    "tension": self.style.tension,
                    "fill": self.style.fill,
                }],
            },
            "options": {
                "responsive": true,
                "scales": {
                    "y": { "beginAtZero": true },
                },
            },
        })
    }
}

/// JSON argument of a label or data update sent to a script backend.
///
/// Non-finite values become `null`, which Chart.js draws as a gap.
pub fn update_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    serde_json::to_string(payload).map_err(|e| CoreError::Render(format!("update payload: {}", e)))
}

/// Rendering library capable of constructing charts.
pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Render a new chart. Fails if the library or the canvas is unavailable.
    fn construct(&self, config: &ChartConfig) -> Result<Self::Handle>;
}

/// Mutable label/series state of one rendered chart.
///
/// Setters only stage data; nothing changes on screen until [`ChartHandle::redraw`].
pub trait ChartHandle {
    fn set_labels(&mut self, labels: &[String]);
    fn set_series_data(&mut self, dataset: usize, values: &[f64]);
    fn redraw(&mut self);
}
