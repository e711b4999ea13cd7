//! Error types for data provider operations

use thiserror::Error;

/// Data provider specific errors
#[derive(Debug, Error)]
pub enum DataError {
    /// The symbol is not in the supported set
    #[error("Unsupported symbol: {symbol}. Supported symbols: {supported}")]
    UnsupportedSymbol {
        symbol: String,
        supported: String,
    },

    /// The provider returned no data for the requested range
    #[error("No price data available for {symbol} between {start_date} and {end_date}")]
    NoData {
        symbol: String,
        start_date: String,
        end_date: String,
    },

    /// A provider returned a non-success HTTP status
    #[error("{provider} API error {status}: {body}")]
    ApiError {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// A required API key is not configured
    #[error("{0} is not set in the environment")]
    MissingKey(&'static str),

    /// A date string could not be parsed as YYYY-MM-DD
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;
