//! Error types for jobscout

use thiserror::Error;

/// Result type alias for jobscout operations
pub type Result<T> = std::result::Result<T, JobscoutError>;

/// Main error type for jobscout
#[derive(Error, Debug)]
pub enum JobscoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Artifact error: {0}")]
    Artifact(String),
}

impl JobscoutError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }
}
