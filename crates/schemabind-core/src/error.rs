//! Error types for catalog access and configuration

use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog and configuration operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A single type descriptor could not be loaded
    ///
    /// Providers report this per entry so callers can skip the type and continue.
    #[error("cannot load type descriptor {type_name}: {reason}")]
    ScanFailure { type_name: String, reason: String },

    /// The catalog source as a whole could not be read or parsed
    #[error("cannot load catalog from {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    /// Descriptor contents violate the catalog rules (empty name, duplicate, ...)
    #[error("invalid descriptor {type_name}: {reason}")]
    InvalidDescriptor { type_name: String, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    /// Returns a stable numeric code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CatalogError::ScanFailure { .. } => 1,
            CatalogError::Load { .. } => 2,
            CatalogError::InvalidDescriptor { .. } => 3,
            CatalogError::Config(_) => 4,
            CatalogError::Serialization(_) => 5,
        }
    }

    /// Create a per-type scan failure
    pub fn scan_failure(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::ScanFailure {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is isolated to a single descriptor
    pub fn is_per_type(&self) -> bool {
        matches!(self, CatalogError::ScanFailure { .. })
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}
