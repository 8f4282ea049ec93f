/// Error types for the page controllers
use thiserror::Error;

/// Main error type for controller operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Period key outside daily/weekly/monthly
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    /// Forecast key not present in the embedded forecast data
    #[error("Unknown forecast period: {0}")]
    UnknownForecastPeriod(String),

    /// Embedded JSON could not be parsed
    #[error("Malformed embedded data in '{id}': {source}")]
    MalformedData {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Required embedded data source is absent from the page
    #[error("Missing embedded data: {0}")]
    MissingData(String),

    /// Required DOM element is absent from the page
    #[error("Missing page element: {0}")]
    MissingElement(String),

    /// Chart construction failed in the rendering backend
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Type alias for Results using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
