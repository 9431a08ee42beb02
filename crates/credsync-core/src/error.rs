//! Error types for credsync-core

use thiserror::Error;

/// Result type alias using credsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in credsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Caller violated an engine contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An exporter file could not be parsed
    #[error("Failed to parse {origin} passwords: {message}")]
    Parse { origin: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored session is unusable
    #[error("Session error: {0}")]
    Session(String),
}
