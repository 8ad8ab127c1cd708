//! # schemabind
//!
//! Generate client bindings, interface definitions and database DDL from one
//! catalog of API types.
//!
//! schemabind reads a catalog of messages, events, replies, inventories,
//! configuration categories and persisted entities, and renders:
//! - Python data classes, JSON templates, a name manifest and action wrappers
//! - Groovy stubs with a required-field directory
//! - TypeScript interface definitions
//! - MySQL views, foreign keys and indexes
//! - A requirement specification document
//!
//! ## Quick Start
//!
//! ```ignore
//! use schemabind::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ManifestCatalog::load("schemabind.toml")?);
//! let generator = Generator::new(catalog, GeneratorConfig::with_output_root("target/bindings"));
//! let result = generator.handle(&GenerationRequest::new(RequestKind::SqlIndex))?;
//! println!("indexes written to {}", result.output.display());
//! ```
//!
//! ## Extension Writers
//!
//! ```ignore
//! use schemabind::prelude::*;
//!
//! struct Banner;
//!
//! impl BindingWriter for Banner {
//!     fn name(&self) -> &str {
//!         "banner"
//!     }
//!
//!     fn write_binding(&self, out: &mut String) -> GenerateResult<()> {
//!         out.push_str("# generated, do not edit\n");
//!         Ok(())
//!     }
//! }
//!
//! generator.register_writer(Arc::new(Banner));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`schemabind_core`] - Descriptors, catalogs, configuration and requests
//! - [`schemabind_codegen`] - Type model, emitters, orchestrator and dispatcher
//! - [`schemabind_logging`] - Subscriber setup and log capture

// Re-export core types
pub use schemabind_core::{
    CatalogEntry, CatalogError, CatalogManifest, CatalogResult, Category, ExtendedObject,
    FieldDescriptor, FieldKind, Flavor, ForeignKey, GenerationEvent, GenerationRequest,
    GenerationResult, GeneratorConfig, LogLevel, ManifestCatalog, ReferenceOption, RequestKind,
    StaticCatalog, TagFilter, TypeCatalog, TypeDescriptor,
};

// Re-export generation types
pub use schemabind_codegen::{
    BindingWriter, CompletionBus, DescriptorEventTypeFactory, Dispatcher, EventTypeFactory,
    GenerateError, GenerateResult, Generator, SourceCatalog, emit, naming,
};

// Re-export logging setup
pub use schemabind_logging::{CaptureLayer, ReloadHandle, init_logging};

// Re-export common dependencies that extension writers need
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use schemabind::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Catalogs: `TypeCatalog`, `ManifestCatalog`, `SourceCatalog`, `StaticCatalog`
/// - Generation: `Generator`, `Dispatcher`, `GenerationRequest`, `RequestKind`
/// - Extension: `BindingWriter`, `GenerateResult`
pub mod prelude {
    pub use crate::{
        BindingWriter, Dispatcher, GenerateError, GenerateResult, GenerationRequest,
        GenerationResult, Generator, GeneratorConfig, LogLevel, ManifestCatalog, RequestKind,
        SourceCatalog, StaticCatalog, TypeCatalog, TypeDescriptor, init_logging,
    };
}
