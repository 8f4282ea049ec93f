//! Current-vs-forecast comparison chart.
//!
//! The server embeds one `forecast-data` element mapping a horizon key
//! (`day`, `week`, `month`) to the current figure and the forecast for
//! that horizon, e.g. `{"day": [120.0, 135.5], "week": [800, 910]}`.

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::config::ForecastChartConfig;
use crate::embedded::{read_required_json, Amount, EmbeddedData};
use crate::error::{CoreError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    One(Amount),
    Many(Vec<Amount>),
}

impl From<RawEntry> for Vec<f64> {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::One(value) => vec![value.0],
            RawEntry::Many(values) => values.into_iter().map(f64::from).collect(),
        }
    }
}

/// Forecast values by horizon key. A bare number loads as a one-element series.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, RawEntry>")]
pub struct ForecastSeries {
    entries: BTreeMap<String, Vec<f64>>,
}

impl From<BTreeMap<String, RawEntry>> for ForecastSeries {
    fn from(raw: BTreeMap<String, RawEntry>) -> Self {
        Self {
            entries: raw.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl FromIterator<(String, Vec<f64>)> for ForecastSeries {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ForecastSeries {
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Keys in `preferred` order first, then any others alphabetically.
    pub fn ordered_keys(&self, preferred: &[String]) -> Vec<String> {
        let mut keys: Vec<String> = preferred
            .iter()
            .filter(|k| self.entries.contains_key(k.as_str()))
            .cloned()
            .collect();
        keys.extend(
            self.entries
                .keys()
                .filter(|k| !preferred.contains(*k))
                .cloned(),
        );
        keys
    }

    /// Percent change from the current figure (first) to the forecast (last).
    ///
    /// `None` for unknown keys and entries with fewer than two points.
    pub fn growth(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            [current, .., forecast] => Some(growth_pct(*forecast, *current)),
            _ => None,
        }
    }
}

/// Percent change rounded to two decimals; `0.0` when `previous` is zero.
pub fn growth_pct(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (((current - previous) / previous) * 100.0 * 100.0).round() / 100.0
}

/// Owns the forecast chart and the embedded forecast values.
pub struct ForecastChartController<H: ChartHandle> {
    chart: H,
    series: ForecastSeries,
    active: Option<String>,
}

impl<H: ChartHandle> ForecastChartController<H> {
    /// Read the required forecast element and render the initial horizon.
    pub fn init<B, S>(backend: &B, source: &S, config: &ForecastChartConfig) -> Result<Self>
    where
        B: ChartBackend<Handle = H>,
        S: EmbeddedData + ?Sized,
    {
        let series: ForecastSeries = read_required_json(source, &config.data_source_id)?;
        Self::with_series(backend, series, config)
    }

    pub fn with_series<B>(backend: &B, series: ForecastSeries, config: &ForecastChartConfig) -> Result<Self>
    where
        B: ChartBackend<Handle = H>,
    {
        let initial = series.get(&config.initial_period).map(<[f64]>::to_vec);
        if initial.is_none() {
            log::warn!(
                "forecast: no '{}' entry in {}, starting empty",
                config.initial_period,
                config.data_source_id
            );
        }
        let chart = backend.construct(&ChartConfig {
            canvas_id: config.canvas_id.clone(),
            labels: config.point_labels.clone(),
            values: initial.clone().unwrap_or_default(),
            style: config.style.clone(),
        })?;
        log::info!("forecast: rendered '{}'", config.canvas_id);
        Ok(Self {
            chart,
            series,
            active: initial.map(|_| config.initial_period.clone()),
        })
    }

    /// Show the values for `key` and redraw. Unknown keys change nothing.
    pub fn switch_forecast(&mut self, key: &str) -> Result<()> {
        let values = self
            .series
            .get(key)
            .ok_or_else(|| CoreError::UnknownForecastPeriod(key.to_string()))?;
        self.chart.set_series_data(0, values);
        self.chart.redraw();
        self.active = Some(key.to_string());
        log::debug!("forecast: switched to {}", key);
        Ok(())
    }

    /// Horizon currently drawn, `None` while the chart is still empty.
    pub fn active_period(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Growth of the horizon currently drawn.
    pub fn active_growth(&self) -> Option<f64> {
        self.active_period().and_then(|key| self.series.growth(key))
    }

    pub fn series(&self) -> &ForecastSeries {
        &self.series
    }
}
