use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] credsync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    ReadInput { path: String, source: io::Error },
    #[error("Merge task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error(
        "No merge session at {0}. Run `credsync merge --apple <PATH> --google <PATH>` first."
    )]
    NoSession(String),
    #[error("Conflict not found: {0}")]
    ConflictNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
