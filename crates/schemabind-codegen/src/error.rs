//! Error types for generation sessions

use schemabind_core::CatalogError;
use std::path::Path;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation operations
///
/// Every variant aborts the whole request. Per-type catalog failures are
/// isolated before they reach this type.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Catalog could not be loaded or configuration is invalid
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Output directory or file could not be reset or written
    #[error("filesystem failure at {path}: {reason}")]
    Filesystem { path: String, reason: String },

    /// Metadata tags contradict each other
    #[error("invalid schema tagging on {type_name}: {reason}")]
    InvalidSchemaTagging { type_name: String, reason: String },

    /// A concrete event type could not be constructed to read its event-type tag
    #[error("cannot generate event type for {type_name}: {reason}")]
    Instantiation { type_name: String, reason: String },

    /// A parent chain revisits a type
    #[error("cyclic type hierarchy: {}", chain.join(" -> "))]
    CyclicHierarchy { chain: Vec<String> },

    /// Rendering failed, usually inside an extension writer
    #[error("render error: {0}")]
    Render(String),
}

impl GenerateError {
    /// Returns a stable numeric code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            GenerateError::Catalog(_) => 1,
            GenerateError::Filesystem { .. } => 2,
            GenerateError::InvalidSchemaTagging { .. } => 3,
            GenerateError::Instantiation { .. } => 4,
            GenerateError::CyclicHierarchy { .. } => 5,
            GenerateError::Render(_) => 6,
        }
    }

    /// Create a filesystem error for `path`
    pub fn filesystem(path: &Path, err: std::io::Error) -> Self {
        GenerateError::Filesystem {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Create an invalid tagging error
    pub fn invalid_tagging(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::InvalidSchemaTagging {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::fmt::Error> for GenerateError {
    fn from(err: std::fmt::Error) -> Self {
        GenerateError::Render(err.to_string())
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::Render(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
