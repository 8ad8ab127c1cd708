//! schemabind-logging - Tracing setup for schemabind
//!
//! This crate provides:
//! - [`init_logging`] installing a `fmt` subscriber with a reloadable level filter
//! - [`ReloadHandle`] for changing the level at runtime
//! - [`CaptureLayer`] recording events in memory, used to assert on skip-and-log behavior

mod layer;
mod reload;

pub use layer::{CaptureLayer, CapturedEvent, init_logging};
pub use reload::ReloadHandle;
pub use schemabind_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CaptureLayer, CapturedEvent, LogLevel, ReloadHandle, init_logging};
}
