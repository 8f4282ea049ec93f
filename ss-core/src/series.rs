use crate::embedded::{read_json, Amount, EmbeddedData, Label};
use crate::error::Result;
use crate::period::Period;
use std::collections::BTreeMap;

/// Labels and values of one selectable period. Both always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series, truncating the longer side if the lengths disagree.
    pub fn new(mut labels: Vec<String>, mut values: Vec<f64>) -> Self {
        if labels.len() != values.len() {
            log::warn!(
                "series: {} labels vs {} values, truncating to the shorter",
                labels.len(),
                values.len()
            );
            let len = labels.len().min(values.len());
            labels.truncate(len);
            values.truncate(len);
        }
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Series for every [`Period`], loaded once at page load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesBundle {
    series: BTreeMap<Period, Series>,
}

impl SeriesBundle {
    /// Read `<period>_labels` / `<period>_data` for every period.
    ///
    /// Missing elements load as empty series; malformed JSON is an error.
    pub fn from_embedded<S: EmbeddedData + ?Sized>(source: &S) -> Result<Self> {
        let mut bundle = Self::default();
        for period in Period::ALL {
            let labels: Vec<Label> = read_json(source, &period.labels_source_id())?;
            let values: Vec<Amount> = read_json(source, &period.data_source_id())?;
            let series = Series::new(
                labels.into_iter().map(String::from).collect(),
                values.into_iter().map(f64::from).collect(),
            );
            log::info!("series: loaded {} points for {}", series.len(), period);
            bundle.insert(period, series);
        }
        Ok(bundle)
    }

    pub fn insert(&mut self, period: Period, series: Series) {
        self.series.insert(period, series);
    }

    /// Series for a period. Bundles built by [`SeriesBundle::from_embedded`]
    /// hold every period; hand-built ones may not.
    pub fn get(&self, period: Period) -> Option<&Series> {
        self.series.get(&period)
    }
}
