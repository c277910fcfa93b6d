use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for descfill.
#[derive(Debug, Error)]
pub enum FillError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A required lookup table could not be read.
    #[error("lookup table {}: {reason}", path.display())]
    Table { path: PathBuf, reason: String },

    /// A single numeric template line could not be compiled.
    #[error("template error: {0}")]
    Template(String),

    /// Error from the remote translation project API.
    #[error("api error: {0}")]
    Api(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
