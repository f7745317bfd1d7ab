/// Error types for the flood outlook library
use thiserror::Error;

/// Main error type for flood outlook operations
#[derive(Error, Debug)]
pub enum OutlookError {
    /// Forecast or place document could not be decoded
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Impact or likelihood outside 1..=4
    #[error("Invalid {field} value {value} for source '{source_code}' (expected 1-4)")]
    InvalidRiskValue {
        field: &'static str,
        value: u8,
        source_code: String,
    },

    /// Place bounding box with min greater than max
    #[error("Invalid bounding box for {0}")]
    InvalidBoundingBox(String),

    /// Failed to write CSV data
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Every fetch attempt against the forecast API failed
    #[cfg(feature = "api")]
    #[error("Forecast unavailable after {attempts} attempts: {url}")]
    UpstreamUnavailable { url: String, attempts: u32 },
}

/// Type alias for Results using OutlookError
pub type Result<T> = std::result::Result<T, OutlookError>;
