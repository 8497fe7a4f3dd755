//! Persistence error types.

use sitecraft_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file was written but could not replace the target
    #[error("Failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize document")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize document")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored document is inconsistent: {0}")]
    InvalidDocument(#[from] ModelError),

    /// Background save thread panicked or was cancelled
    #[error("Save task did not complete: {0}")]
    Interrupted(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
