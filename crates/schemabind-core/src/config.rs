//! Generator configuration

use crate::LogLevel;
use crate::error::{CatalogError, CatalogResult};
use crate::request::{GenerationRequest, RequestKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generator configuration, loaded from the file given to `--config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Root under which per-kind default directories are created
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Namespaces used when a request names none; empty means the whole catalog
    #[serde(default)]
    pub namespaces: Vec<String>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// File name of the interface definition artifact
    #[serde(default = "default_interface_file")]
    pub interface_file: String,

    #[serde(default)]
    pub data_class: DataClassOptions,

    #[serde(default)]
    pub stub: StubOptions,

    #[serde(default)]
    pub sql: SqlOptions,
}

/// Options for the data-class backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataClassOptions {
    /// Catalog types rendered as flat helper classes ahead of the messages
    #[serde(default)]
    pub helper_types: Vec<String>,
}

/// Options for the stub backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubOptions {
    /// Groovy package of the generated files
    #[serde(default = "default_stub_package")]
    pub package: String,

    /// Catalog event type whose tag is exported as `API_EVENT_TYPE`
    #[serde(default)]
    pub base_event_type: Option<String>,
}

/// Options for the SQL backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlOptions {
    /// Database schema the statements target
    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_output_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_interface_file() -> String {
    "api.ts".to_string()
}

fn default_stub_package() -> String {
    "zstack.ui.api".to_string()
}

fn default_schema() -> String {
    "zstack".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            namespaces: Vec::new(),
            log_level: LogLevel::default(),
            interface_file: default_interface_file(),
            data_class: DataClassOptions::default(),
            stub: StubOptions::default(),
            sql: SqlOptions::default(),
        }
    }
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            package: default_stub_package(),
            base_event_type: None,
        }
    }
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            schema: default_schema(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration writing under `output_root`
    pub fn with_output_root(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> CatalogResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file; `.json` files are parsed as JSON, anything else as TOML
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json(content.as_bytes())?
        } else {
            Self::from_toml(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check option values
    pub fn validate(&self) -> CatalogResult<()> {
        if self.interface_file.trim().is_empty() {
            return Err(CatalogError::Config(
                "interface_file cannot be empty".to_string(),
            ));
        }
        if self.sql.schema.trim().is_empty() {
            return Err(CatalogError::Config("sql.schema cannot be empty".to_string()));
        }
        if self.sql.schema.contains('`') {
            return Err(CatalogError::Config(format!(
                "sql.schema contains a backtick: {}",
                self.sql.schema
            )));
        }
        Ok(())
    }

    /// Default output location for a request kind
    ///
    /// Directory kinds resolve to `{output_root}/{dir}`; the interface kind resolves
    /// to the definitions file inside its directory.
    pub fn default_output(&self, kind: RequestKind) -> PathBuf {
        let dir = self.output_root.join(kind.default_dir_name());
        if kind.writes_single_file() {
            dir.join(&self.interface_file)
        } else {
            dir
        }
    }

    /// Output location of a request: explicit path or the kind's default
    pub fn resolve_output(&self, request: &GenerationRequest) -> PathBuf {
        request
            .output
            .clone()
            .unwrap_or_else(|| self.default_output(request.kind))
    }

    /// Namespaces a request covers; `[""]` stands for the whole catalog
    pub fn resolve_namespaces(&self, request: &GenerationRequest) -> Vec<String> {
        if !request.namespaces.is_empty() {
            request.namespaces.clone()
        } else if !self.namespaces.is_empty() {
            self.namespaces.clone()
        } else {
            vec![String::new()]
        }
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
