//! Dynamic log level reloading support

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use schemabind_core::{CatalogError, CatalogResult, LogLevel};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Registry, reload};

/// Handle for dynamically reloading the log level filter
pub struct ReloadHandle {
    state: Mutex<Option<ReloadState>>,
}

struct ReloadState {
    handle: reload::Handle<LevelFilter, Registry>,
    level: LogLevel,
}

impl ReloadHandle {
    /// Create an uninitialized reload handle
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Install the subscriber's reload handle (called by [`crate::init_logging`])
    pub fn set_handle(&self, handle: reload::Handle<LevelFilter, Registry>, level: LogLevel) {
        *self.state.lock() = Some(ReloadState { handle, level });
    }

    /// Whether a subscriber handle has been installed
    pub fn is_initialized(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Level currently applied, if initialized
    pub fn current_level(&self) -> Option<LogLevel> {
        self.state.lock().as_ref().map(|state| state.level)
    }

    /// Reload the filter to use a new log level
    pub fn reload_level(&self, level: LogLevel) -> CatalogResult<()> {
        let mut guard = self.state.lock();
        let state = guard
            .as_mut()
            .ok_or_else(|| CatalogError::Config("log reload handle not initialized".to_string()))?;

        state
            .handle
            .reload(level_filter(level))
            .map_err(|e| CatalogError::Config(format!("failed to reload log filter: {e}")))?;
        state.level = level;
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert LogLevel to tracing LevelFilter
pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
