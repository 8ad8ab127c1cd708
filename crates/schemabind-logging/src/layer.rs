//! Subscriber initialization and the in-memory capture layer

use crate::reload::{ReloadHandle, level_filter};
use parking_lot::Mutex;
use schemabind_core::{CatalogError, CatalogResult, LogLevel};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// One event recorded by [`CaptureLayer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: LogLevel,
    pub target: String,
    /// Message text followed by ` key=value` for each structured field
    pub message: String,
}

/// Tracing layer that records events in memory
///
/// Clones share the same buffer, so a test can keep one clone and install the other.
#[derive(Debug, Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Create a layer with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Whether an event at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| event.level == level && event.message.contains(needle))
    }

    /// Drop recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Convert tracing Level to our LogLevel
    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.events.lock().push(CapturedEvent {
            level: Self::convert_level(metadata.level()),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        });
    }
}

/// Visitor collecting the message and structured fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message.unwrap_or_default();
        for field in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&field);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Install the global subscriber: a reloadable level filter and a `fmt` layer on stderr
///
/// Calling this again only changes the level.
pub fn init_logging(level: LogLevel) -> CatalogResult<()> {
    use tracing_subscriber::prelude::*;

    let reload_handle = ReloadHandle::global();
    if reload_handle.is_initialized() {
        return reload_handle.reload_level(level);
    }

    let (filter, handle) = tracing_subscriber::reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CatalogError::Config(format!("cannot install log subscriber: {e}")))?;
    reload_handle.set_handle(handle, level);
    Ok(())
}
