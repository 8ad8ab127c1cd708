//! Catalog loading and the `check` command

use anyhow::{Context, Result};
use schemabind_codegen::SourceCatalog;
use schemabind_core::{CatalogManifest, ManifestCatalog, TypeCatalog};
use std::path::Path;
use std::sync::Arc;

/// How a catalog path is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// TOML or JSON manifest
    Manifest,
    /// Annotated Rust sources
    Sources,
}

impl CatalogSource {
    /// Directories and `.rs` files are sources; everything else is a manifest
    pub fn detect(path: &Path) -> Self {
        let is_rust = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rs"));
        if path.is_dir() || is_rust {
            CatalogSource::Sources
        } else {
            CatalogSource::Manifest
        }
    }
}

/// Open the catalog at `path`
pub fn load(path: &Path) -> Result<Arc<dyn TypeCatalog>> {
    let catalog: Arc<dyn TypeCatalog> = match CatalogSource::detect(path) {
        CatalogSource::Manifest => Arc::new(
            ManifestCatalog::load(path)
                .with_context(|| format!("Failed to load catalog manifest: {}", path.display()))?,
        ),
        CatalogSource::Sources => Arc::new(
            SourceCatalog::scan(path)
                .with_context(|| format!("Failed to scan catalog sources: {}", path.display()))?,
        ),
    };
    Ok(catalog)
}

/// Check command implementation
///
/// Manifests must validate as a whole; source catalogs must scan without any
/// per-type failure.
pub fn check(path: &Path) -> Result<()> {
    println!("Checking catalog: {}", path.display());

    match CatalogSource::detect(path) {
        CatalogSource::Manifest => {
            let manifest = CatalogManifest::from_file(path)
                .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
            manifest.validate().context("Manifest is invalid")?;

            println!("✓ Catalog: {}", manifest.catalog.name);
            println!("✓ Types: {}", manifest.types.len());
        }
        CatalogSource::Sources => {
            let catalog = SourceCatalog::scan(path)
                .with_context(|| format!("Failed to scan sources: {}", path.display()))?;
            let entries = catalog.entries();
            let failures: Vec<String> = entries
                .iter()
                .filter_map(|entry| entry.as_ref().err())
                .map(ToString::to_string)
                .collect();
            if !failures.is_empty() {
                for failure in &failures {
                    eprintln!("✗ {failure}");
                }
                anyhow::bail!("{} of {} types failed to load", failures.len(), entries.len());
            }

            println!("✓ Types: {}", entries.len());
        }
    }

    println!("\nCatalog is valid!");
    Ok(())
}

#[cfg(test)]
#[path = "catalog/catalog_tests.rs"]
mod catalog_tests;
