//! # Catalog Errors
//!
//! Error types for dataset loading and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// None of the candidate dataset files exist
    #[error("No dataset found (tried: {})", display_paths(.0))]
    NotFound(Vec<PathBuf>),

    /// Dataset file could not be read or written
    #[error("Dataset I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or has the wrong shape
    #[error("Malformed dataset: {0}")]
    Malformed(String),

    /// Dataset could not be serialized for persistence
    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-dataset error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
