//! Rendered files awaiting a write

use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// One rendered file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Hex SHA-256 over artifact paths and contents in order
pub fn digest(artifacts: &[Artifact]) -> String {
    let mut hasher = Sha256::new();
    for artifact in artifacts {
        hasher.update(artifact.path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(artifact.contents.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
