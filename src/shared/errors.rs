//! Error handling for the application

use thiserror::Error;

/// Price-analysis errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("No historical data provided")]
    NoHistoricalData,

    #[error("Invalid month-day token: {0}")]
    InvalidMonthDay(String),
}

/// History source errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Product history not found: {0}")]
    NotFound(String),

    #[error("Failed to read history {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse history {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Price analysis error: {0}")]
    Price(#[from] PriceError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
