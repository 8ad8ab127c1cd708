//! schemabind-core - Type catalog model, configuration and request types
//!
//! This crate provides the foundational types shared by every schemabind backend:
//! - [`TypeDescriptor`] and [`FieldDescriptor`] describing generatable types
//! - [`TypeCatalog`] trait with static, manifest-file and in-memory providers
//! - [`GeneratorConfig`] for output locations and backend options
//! - [`GenerationRequest`] / [`GenerationResult`] for one generation session
//! - [`CatalogError`] for error handling

mod catalog;
mod config;
mod descriptor;
mod error;
mod manifest;
mod request;

pub use catalog::{CatalogEntry, StaticCatalog, TagFilter, TypeCatalog};
pub use config::{DataClassOptions, GeneratorConfig, SqlOptions, StubOptions};
pub use descriptor::{
    Category, ConstantDescriptor, ExtendedObject, FieldDescriptor, FieldKind, Flavor, ForeignKey,
    ReferenceOption, TypeDescriptor,
};
pub use error::{CatalogError, CatalogResult};
pub use manifest::{CatalogManifest, CatalogSection, ManifestCatalog};
pub use request::{GenerationEvent, GenerationRequest, GenerationResult, RequestKind};

/// Log levels accepted by configuration files and the CLI
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(CatalogError::Config(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CatalogEntry, CatalogError, CatalogResult, Category, FieldDescriptor, FieldKind,
        GenerationRequest, GenerationResult, GeneratorConfig, LogLevel, RequestKind, TagFilter,
        TypeCatalog, TypeDescriptor,
    };
}
