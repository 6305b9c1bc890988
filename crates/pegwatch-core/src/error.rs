//! Error types for pegwatch

use thiserror::Error;

use crate::feed::FetchError;

/// Result type alias using pegwatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pegwatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Price feed error
    #[error("Price feed error: {0}")]
    Fetch(#[from] FetchError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
