//! Generation request, result and completion event types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Kind of artifact a generation request produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Python data classes, JSON templates, name manifest and actions
    DataClassBinding,
    /// Groovy stub classes and the required-field directory
    StubBinding,
    /// TypeScript interface definitions
    InterfaceBinding,
    /// SQL views over extended-object companion tables
    SqlView,
    /// SQL foreign-key constraints
    SqlForeignKey,
    /// SQL indexes
    SqlIndex,
    /// Requirement specification document
    DocumentArtifact,
}

impl RequestKind {
    /// Every request kind, in CLI order
    pub const ALL: [RequestKind; 7] = [
        RequestKind::DataClassBinding,
        RequestKind::StubBinding,
        RequestKind::InterfaceBinding,
        RequestKind::SqlView,
        RequestKind::SqlForeignKey,
        RequestKind::SqlIndex,
        RequestKind::DocumentArtifact,
    ];

    /// Directory name used under the output root when no output path is given
    pub fn default_dir_name(&self) -> &'static str {
        match self {
            RequestKind::DataClassBinding => "schemabind-python-template",
            RequestKind::StubBinding => "schemabind-groovy-template",
            RequestKind::InterfaceBinding => "schemabind-api-typescript",
            RequestKind::SqlView => "schemabind-mysql-view",
            RequestKind::SqlForeignKey => "schemabind-mysql-foreign-key",
            RequestKind::SqlIndex => "schemabind-mysql-index",
            RequestKind::DocumentArtifact => "schemabind-testlink",
        }
    }

    /// Whether the output path names a single file rather than a directory
    pub fn writes_single_file(&self) -> bool {
        matches!(self, RequestKind::InterfaceBinding)
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestKind::DataClassBinding => "data-class",
            RequestKind::StubBinding => "stub",
            RequestKind::InterfaceBinding => "interface",
            RequestKind::SqlView => "sql-view",
            RequestKind::SqlForeignKey => "sql-foreign-key",
            RequestKind::SqlIndex => "sql-index",
            RequestKind::DocumentArtifact => "document",
        };
        f.write_str(name)
    }
}

/// One generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Request id echoed in the completion event
    pub id: Uuid,

    pub kind: RequestKind,

    /// Explicit output location; derived from the kind when absent
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Namespace filters; empty means the configured defaults
    #[serde(default)]
    pub namespaces: Vec<String>,
}

impl GenerationRequest {
    /// Create a request with a fresh id and no output or namespace override
    pub fn new(kind: RequestKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            output: None,
            namespaces: Vec::new(),
        }
    }

    /// Set an explicit output location
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Add a namespace filter
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }
}

/// Outcome of a successful generation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub request_id: Uuid,

    pub kind: RequestKind,

    /// Resolved output location
    pub output: PathBuf,

    pub success: bool,

    /// Written files relative to the output directory, in write order
    pub files: Vec<PathBuf>,

    /// Hex SHA-256 over every written artifact in write order
    pub digest: String,
}

/// Completion signal published once per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationEvent {
    pub request_id: Uuid,

    pub kind: RequestKind,

    /// Resolved output location
    pub output: PathBuf,

    pub success: bool,

    /// Failure description when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationEvent {
    /// Event for a failed request
    pub fn failed(request: &GenerationRequest, output: PathBuf, error: impl Into<String>) -> Self {
        Self {
            request_id: request.id,
            kind: request.kind,
            output,
            success: false,
            error: Some(error.into()),
        }
    }
}

impl From<&GenerationResult> for GenerationEvent {
    fn from(result: &GenerationResult) -> Self {
        Self {
            request_id: result.request_id,
            kind: result.kind,
            output: result.output.clone(),
            success: result.success,
            error: None,
        }
    }
}
