//! Error types for Brixscope

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Brixscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening or exporting an explorer session
///
/// Slider input never produces an error: out-of-range values are clamped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Predictor artifact does not exist (fatal at session start)
    #[error("Model artifact not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Predictor artifact exists but cannot be used (fatal at session start)
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether this error means the session cannot start at all
    pub fn is_startup_failure(&self) -> bool {
        matches!(self, Error::ModelNotFound(_) | Error::ModelLoad(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}
