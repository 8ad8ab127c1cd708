//! schemabind-codegen - Type model, emitters and generation orchestrator
//!
//! This crate turns a [`schemabind_core::TypeCatalog`] into binding artifacts:
//! - [`ModelBuilder`] resolving descriptors into parent-first [`TypeModel`]s
//! - [`EmissionMemo`] and [`emit_with_ancestors`] writing each type once
//! - [`emit`] backends for Python, JSON, Groovy, TypeScript, MySQL and XML
//! - [`Generator`] running one request as one session
//! - [`Dispatcher`] serializing requests that share an output location
//! - [`SourceCatalog`] reading `#[schema(...)]` annotations from Rust sources
//!
//! ## Example
//!
//! ```ignore
//! use schemabind_codegen::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(SourceCatalog::scan("src/api")?);
//! let generator = Generator::new(catalog, GeneratorConfig::with_output_root("target/bindings"));
//! let result = generator.handle(&GenerationRequest::new(RequestKind::DataClassBinding))?;
//! println!("wrote {} files", result.files.len());
//! ```

mod artifact;
mod bus;
mod dispatch;
pub mod emit;
mod error;
mod events;
mod extension;
mod memo;
mod model;
pub mod naming;
mod orchestrator;
mod source;

#[cfg(test)]
mod test_support;

pub use artifact::{Artifact, digest};
pub use bus::CompletionBus;
pub use dispatch::Dispatcher;
pub use emit::typescript::InterfaceSets;
pub use error::{GenerateError, GenerateResult};
pub use events::{DescriptorEventTypeFactory, EventTypeFactory};
pub use extension::BindingWriter;
pub use memo::{EmissionMemo, emit_with_ancestors};
pub use model::{ModelBuilder, TypeModel, TypeModelNode};
pub use orchestrator::Generator;
pub use source::SourceCatalog;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BindingWriter, CompletionBus, Dispatcher, EventTypeFactory, GenerateError, GenerateResult,
        Generator, SourceCatalog,
    };
    pub use schemabind_core::{
        GenerationRequest, GenerationResult, GeneratorConfig, RequestKind, TypeCatalog,
    };
}
