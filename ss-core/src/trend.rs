//! Revenue trend chart with daily/weekly/monthly switching.

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::config::TrendChartConfig;
use crate::embedded::EmbeddedData;
use crate::error::Result;
use crate::period::Period;
use crate::series::{Series, SeriesBundle};

/// Owns the trend chart and the series for every period.
pub struct TrendChartController<H: ChartHandle> {
    chart: H,
    bundle: SeriesBundle,
    active: Period,
}

impl<H: ChartHandle> TrendChartController<H> {
    /// Load every period from the page and render the initial one.
    pub fn init<B, S>(backend: &B, source: &S, config: &TrendChartConfig) -> Result<Self>
    where
        B: ChartBackend<Handle = H>,
        S: EmbeddedData + ?Sized,
    {
        let bundle = SeriesBundle::from_embedded(source)?;
        Self::with_bundle(backend, bundle, config)
    }

    /// Render the initial period of an already loaded bundle.
    pub fn with_bundle<B>(backend: &B, bundle: SeriesBundle, config: &TrendChartConfig) -> Result<Self>
    where
        B: ChartBackend<Handle = H>,
    {
        let active = config.initial_period;
        let initial = bundle.get(active).cloned().unwrap_or_default();
        let chart = backend.construct(&ChartConfig {
            canvas_id: config.canvas_id.clone(),
            labels: initial.labels().to_vec(),
            values: initial.values().to_vec(),
            style: config.style.clone(),
        })?;
        log::info!(
            "trend: rendered '{}' with {} {} points",
            config.canvas_id,
            initial.len(),
            active
        );
        Ok(Self {
            chart,
            bundle,
            active,
        })
    }

    /// Show `period`'s labels and values and redraw.
    pub fn switch_period(&mut self, period: Period) {
        let empty = Series::default();
        let series = self.bundle.get(period).unwrap_or(&empty);
        self.chart.set_labels(series.labels());
        self.chart.set_series_data(0, series.values());
        self.chart.redraw();
        self.active = period;
        log::debug!("trend: switched to {} ({} points)", period, series.len());
    }

    /// String entry point for page buttons and `window.updateChart`.
    ///
    /// An unknown key is an error and leaves the chart untouched.
    pub fn switch_period_key(&mut self, key: &str) -> Result<()> {
        let period = key.parse::<Period>()?;
        self.switch_period(period);
        Ok(())
    }

    pub fn active_period(&self) -> Period {
        self.active
    }

    pub fn bundle(&self) -> &SeriesBundle {
        &self.bundle
    }
}
