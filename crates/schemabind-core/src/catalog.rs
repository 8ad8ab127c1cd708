//! Type catalog provider contract and the in-memory provider

use crate::descriptor::{Category, TypeDescriptor};
use crate::error::{CatalogError, CatalogResult};

/// One catalog lookup result
///
/// A failed entry is isolated to a single type; callers log it and continue.
pub type CatalogEntry = CatalogResult<TypeDescriptor>;

/// Metadata tag used to include or exclude types in a catalog lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFilter {
    /// Type belongs to the given category
    Category(Category),
    /// Type is declared abstract
    Abstract,
    /// Type is declared as an enum
    Enum,
    /// Type is tagged as an extended object
    ExtendedObject,
    /// Type exports constants (enum values or named constants)
    ExportsConstants,
    /// Type is excluded from data-class bindings
    NoBinding,
}

impl TagFilter {
    /// Whether a descriptor carries this tag
    pub fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        match self {
            TagFilter::Category(category) => descriptor.category == *category,
            TagFilter::Abstract => descriptor.is_abstract,
            TagFilter::Enum => descriptor.is_enum,
            TagFilter::ExtendedObject => descriptor.extended_object.is_some(),
            TagFilter::ExportsConstants => descriptor.exports_constants(),
            TagFilter::NoBinding => descriptor.no_binding,
        }
    }
}

/// Source of raw type descriptors
///
/// Implementations are pure lookups: repeated calls return the same entries in
/// the same order.
pub trait TypeCatalog: Send + Sync {
    /// Every entry in catalog order, including per-type failures
    fn entries(&self) -> Vec<CatalogEntry>;

    /// Entries under `namespace` carrying every `include` tag and no `exclude` tag
    ///
    /// Per-type failures are always passed through since their tags are unknown.
    fn find_types_by_namespace(
        &self,
        namespace: &str,
        include: &[TagFilter],
        exclude: &[TagFilter],
    ) -> Vec<CatalogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| match entry {
                Ok(descriptor) => {
                    descriptor.in_namespace(namespace)
                        && include.iter().all(|tag| tag.matches(descriptor))
                        && !exclude.iter().any(|tag| tag.matches(descriptor))
                }
                Err(_) => true,
            })
            .collect()
    }

    /// Look up a successfully loaded descriptor by simple name
    fn find_type(&self, name: &str) -> Option<TypeDescriptor> {
        self.entries()
            .into_iter()
            .filter_map(Result::ok)
            .find(|descriptor| descriptor.name == name)
    }
}

/// In-memory catalog built from descriptors
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from descriptors, keeping their order
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self {
            entries: descriptors.into_iter().map(Ok).collect(),
        }
    }

    /// Build a catalog from raw entries, failures included
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Append a descriptor
    ///
    /// Fails if a descriptor with the same simple name is already present.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> CatalogResult<()> {
        descriptor.validate()?;
        let duplicate = self
            .entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok())
            .any(|existing| existing.name == descriptor.name);
        if duplicate {
            return Err(CatalogError::InvalidDescriptor {
                type_name: descriptor.name,
                reason: "type already present in catalog".to_string(),
            });
        }
        self.entries.push(Ok(descriptor));
        Ok(())
    }

    /// Append a per-type failure
    pub fn push_failure(&mut self, error: CatalogError) {
        self.entries.push(Err(error));
    }

    /// Number of entries, failures included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeCatalog for StaticCatalog {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }
}
