//! Error types for pod-fetch
//!
//! One error enum covers the whole tool. Note that two failure classes are
//! deliberately NOT surfaced through this type at the pipeline boundary:
//! exhausted API retries degrade to an empty batch, and per-file download
//! failures are absorbed inside the fetcher. `Error` is what the remaining
//! operations (config, input parsing, report writing) propagate with `?`.

use thiserror::Error;

/// Result type alias for pod-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pod-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "batch_size")
        key: Option<String>,
    },

    /// Network error from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The tracking API rejected the request or signalled failure
    #[error("API error: {0}")]
    Api(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input file missing, unselected, or unreadable
    #[error("input file error: {0}")]
    InputFile(String),

    /// Spreadsheet could not be read or written
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
}

impl From<calamine::XlsxError> for Error {
    fn from(e: calamine::XlsxError) -> Self {
        Error::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Error::Spreadsheet(e.to_string())
    }
}
