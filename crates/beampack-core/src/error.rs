//! Error types for beam packing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for packing operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors that can occur while loading, configuring, or packing beams.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("cannot read {}", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl PackError {
    /// Line number of a catalog parse failure, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            PackError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
