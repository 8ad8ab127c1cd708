//! Per-output request serialization

use crate::error::GenerateResult;
use crate::orchestrator::Generator;
use dashmap::DashMap;
use parking_lot::Mutex;
use schemabind_core::{GenerationRequest, GenerationResult};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Runs requests so two sessions never write the same output concurrently
///
/// Requests resolving to the same output path take turns; different paths run
/// in parallel on their callers' threads.
#[derive(Clone)]
pub struct Dispatcher {
    generator: Arc<Generator>,
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Dispatcher {
    pub fn new(generator: Arc<Generator>) -> Self {
        Self {
            generator,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Run `request` while holding the lock of its resolved output path
    pub fn dispatch(&self, request: &GenerationRequest) -> GenerateResult<GenerationResult> {
        let output = self.generator.config().resolve_output(request);
        let lock = self.lock_for(lock_key(&output));
        let _guard = lock.lock();
        self.generator.handle(request)
    }

    /// Number of distinct output paths seen so far
    pub fn tracked_outputs(&self) -> usize {
        self.locks.len()
    }

    fn lock_for(&self, output: PathBuf) -> Arc<Mutex<()>> {
        // clone out of the map so the shard lock is released before blocking
        Arc::clone(self.locks.entry(output).or_default().value())
    }
}

/// Absolute, lexically cleaned spelling of `output`
///
/// `out`, `./out` and `/cwd/tmp/../out` share one key. Symlinks are not
/// resolved.
fn lock_key(output: &Path) -> PathBuf {
    let absolute = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                key.pop();
            }
            other => key.push(other),
        }
    }
    key
}
