//! Completion signals for generation requests

use schemabind_core::GenerationEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Broadcast channel carrying one [`GenerationEvent`] per request
#[derive(Clone)]
pub struct CompletionBus {
    sender: broadcast::Sender<GenerationEvent>,
    published: Arc<AtomicU64>,
}

impl CompletionBus {
    /// Create a bus retaining up to 64 unread events per subscriber
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish an event; having no subscribers is not an error
    pub fn publish(&self, event: GenerationEvent) {
        self.published.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(event).is_err() {
            tracing::trace!("completion event dropped, no subscribers");
        }
    }

    /// Receive events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<GenerationEvent> {
        self.sender.subscribe()
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }
}

impl Default for CompletionBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bus/bus_tests.rs"]
mod bus_tests;
