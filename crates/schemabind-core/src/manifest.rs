//! Schema manifest parsing and the manifest-backed catalog

use crate::catalog::{CatalogEntry, TypeCatalog};
use crate::descriptor::TypeDescriptor;
use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Schema manifest structure (`schemabind.toml` or `.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub catalog: CatalogSection,

    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogManifest {
    /// Load a manifest from a file; `.json` files are parsed as JSON, anything else as TOML
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Load {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        };

        parsed.map_err(|e| CatalogError::Load {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a TOML manifest
    pub fn parse_toml(content: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON manifest
    pub fn parse_json(content: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate the manifest as a whole
    ///
    /// Unlike catalog lookups, which isolate bad descriptors, this reports the
    /// first problem found. Used by `schemabind check`.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.catalog.name.trim().is_empty() {
            return Err(CatalogError::Config(
                "catalog name cannot be empty".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for descriptor in &self.types {
            descriptor.validate()?;
            if !names.insert(descriptor.name.as_str()) {
                return Err(CatalogError::InvalidDescriptor {
                    type_name: descriptor.name.clone(),
                    reason: "type declared more than once".to_string(),
                });
            }
        }

        for descriptor in &self.types {
            if let Some(parent) = &descriptor.parent
                && !names.contains(parent.as_str())
            {
                return Err(CatalogError::scan_failure(
                    &descriptor.name,
                    format!("parent {parent} not found"),
                ));
            }
        }

        Ok(())
    }
}

/// Catalog backed by a schema manifest file
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    name: String,
    entries: Vec<CatalogEntry>,
}

impl ManifestCatalog {
    /// Load a manifest file and index its descriptors
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let manifest = CatalogManifest::from_file(path)?;
        tracing::debug!(
            path = %path.display(),
            catalog = %manifest.catalog.name,
            types = manifest.types.len(),
            "loaded catalog manifest"
        );
        Ok(Self::from_manifest(manifest))
    }

    /// Index an already parsed manifest
    ///
    /// Invalid or duplicate descriptors become per-type failures.
    pub fn from_manifest(manifest: CatalogManifest) -> Self {
        let mut seen = HashSet::new();
        let entries = manifest
            .types
            .into_iter()
            .map(|descriptor| {
                if let Err(e) = descriptor.validate() {
                    return Err(CatalogError::scan_failure(&descriptor.name, e.to_string()));
                }
                if !seen.insert(descriptor.name.clone()) {
                    return Err(CatalogError::scan_failure(
                        &descriptor.name,
                        "type declared more than once",
                    ));
                }
                Ok(descriptor)
            })
            .collect();

        Self {
            name: manifest.catalog.name,
            entries,
        }
    }

    /// Catalog name from the manifest header
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TypeCatalog for ManifestCatalog {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }
}
