//! Type catalog scanned from annotated Rust sources
//!
//! Structs and enums carrying a `#[schema(...)]` attribute become type
//! descriptors; struct fields are refined with `#[field(...)]`.
//!
//! ```rust,ignore
//! #[schema(category = "message", namespace = "org.zstack.vm", parent = "APIMessage")]
//! pub struct APIStartVmInstanceMsg {
//!     #[field(required)]
//!     pub uuid: String,
//!     pub host_uuid: Option<String>,
//!     #[field(valid_values = ["Running", "Stopped"])]
//!     pub state: String,
//! }
//! ```
//!
//! # Type attributes
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `category = "..."` | `message`, `event`, `reply`, `inventory`, `config`, `persisted_entity` (required) |
//! | `namespace = "..."` | Namespace of the qualified name; defaults to the file's module path |
//! | `parent = "..."` | Simple name of the parent type |
//! | `abstract`, `base`, `no_binding`, `not_instantiable` | Flags |
//! | `flavor = "..."` | `search`, `list`, `get`, `delete` |
//! | `event_type = "..."` | Explicit event-type tag |
//! | `companion = "..."` | Extended object over the companion table |
//! | `soft_deleted_column = "..."`, `no_view` | Extended-object options |
//! | `constants(NAME = "value", ...)` | Exported constants |
//!
//! # Field attributes
//!
//! `required`, `hidden`, `transient`, `index`, `valid_values = [..]`,
//! `value_type = "..."`, `foreign_key = "Entity"`, `parent_key = "..."`,
//! `on_delete = "..."`, `on_update = "..."`.
//!
//! Field shape comes from the Rust type: `Vec`, `HashSet`, `BTreeSet` and
//! `VecDeque` are collections, `HashMap` and `BTreeMap` are maps, and `Option`
//! is looked through.
//!
//! A file that fails to parse, or an item with a bad attribute, becomes a
//! per-type failure; the rest of the catalog still loads.

use schemabind_core::{
    CatalogEntry, CatalogError, CatalogResult, Category, ExtendedObject, FieldDescriptor,
    FieldKind, Flavor, ForeignKey, ReferenceOption, TypeCatalog, TypeDescriptor,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, Fields, GenericArgument, Lit, LitStr, PathArguments, Type};
use walkdir::WalkDir;

/// Catalog built by scanning `.rs` files once at startup
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl SourceCatalog {
    /// Scan a source file or every `.rs` file below a directory
    ///
    /// Files are visited in sorted path order. Symlinks are not followed.
    pub fn scan(root: impl AsRef<Path>) -> CatalogResult<Self> {
        let root = root.as_ref().to_path_buf();
        let mut entries = Vec::new();
        let files = collect_sources(&root, &mut entries)?;
        for file in &files {
            let namespace = module_namespace(&root, file);
            match std::fs::read_to_string(file) {
                Ok(source) => entries.extend(parse_entries(&source, &namespace, file)),
                Err(e) => entries.push(Err(CatalogError::scan_failure(
                    file.display().to_string(),
                    e.to_string(),
                ))),
            }
        }
        dedup_names(&mut entries);

        tracing::debug!(
            root = %root.display(),
            files = files.len(),
            types = entries.len(),
            "scanned source catalog"
        );
        Ok(Self { root, entries })
    }

    /// Parse one source text with `namespace` as the default namespace
    pub fn parse_source(source: &str, namespace: &str) -> Vec<CatalogEntry> {
        let mut entries = parse_entries(source, namespace, Path::new("<source>"));
        dedup_names(&mut entries);
        entries
    }

    /// Path the catalog was scanned from
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TypeCatalog for SourceCatalog {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }
}

/// `.rs` files below `root`, or `root` itself when it is a file
///
/// A missing root is fatal; entries that cannot be read below it are recorded
/// as per-type failures.
fn collect_sources(root: &Path, entries: &mut Vec<CatalogEntry>) -> CatalogResult<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root).map_err(|e| CatalogError::Load {
        source_name: root.display().to_string(),
        reason: e.to_string(),
    })?;
    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let name = e.path().unwrap_or(root).display().to_string();
                entries.push(Err(CatalogError::scan_failure(name, e.to_string())));
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "rs") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Dotted module path of `file` relative to `root`
///
/// `lib.rs`, `main.rs` and `mod.rs` name their directory. A single scanned
/// file is named by its stem.
fn module_namespace(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    if relative.as_os_str().is_empty() {
        return file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    let mut parts: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts
        .last()
        .is_some_and(|p| matches!(p.as_str(), "lib" | "main" | "mod"))
    {
        parts.pop();
    }
    parts.join(".")
}

fn dedup_names(entries: &mut [CatalogEntry]) {
    let mut seen = HashSet::new();
    for entry in entries.iter_mut() {
        let Ok(descriptor) = entry else {
            continue;
        };
        if seen.insert(descriptor.name.clone()) {
            continue;
        }
        let name = descriptor.name.clone();
        *entry = Err(CatalogError::scan_failure(
            name,
            "type declared more than once",
        ));
    }
}

fn parse_entries(source: &str, namespace: &str, file: &Path) -> Vec<CatalogEntry> {
    let parsed = match syn::parse_file(source) {
        Ok(parsed) => parsed,
        Err(e) => {
            return vec![Err(CatalogError::scan_failure(
                file.display().to_string(),
                format!("cannot parse source: {e}"),
            ))];
        }
    };

    let mut entries = Vec::new();
    for item in &parsed.items {
        let (name, result) = match item {
            syn::Item::Struct(s) if has_schema_attr(&s.attrs) => {
                (s.ident.to_string(), from_struct(s, namespace))
            }
            syn::Item::Enum(e) if has_schema_attr(&e.attrs) => {
                (e.ident.to_string(), from_enum(e, namespace))
            }
            _ => continue,
        };
        let entry = match result {
            Ok(descriptor) => descriptor
                .validate()
                .map(|()| descriptor)
                .map_err(|e| CatalogError::scan_failure(&name, e.to_string())),
            Err(e) => Err(CatalogError::scan_failure(&name, e.to_string())),
        };
        entries.push(entry);
    }
    entries
}

fn has_schema_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("schema"))
}

/// Values collected from `#[schema(...)]`
#[derive(Debug, Default)]
struct SchemaAttrs {
    category: Option<Category>,
    namespace: Option<String>,
    parent: Option<String>,
    is_abstract: bool,
    base: bool,
    no_binding: bool,
    not_instantiable: bool,
    flavor: Option<Flavor>,
    event_type: Option<String>,
    companion: Option<String>,
    soft_deleted_column: Option<String>,
    no_view: bool,
    constants: Vec<(String, String)>,
}

impl SchemaAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
            attr.parse_nested_meta(|meta| parsed.parse_entry(meta))?;
        }
        Ok(parsed)
    }

    fn parse_entry(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        let Some(key) = meta.path.get_ident().map(|i| i.to_string()) else {
            return Err(meta.error("expected a schema key"));
        };
        match key.as_str() {
            "category" => self.category = Some(parse_category(&string_value(&meta)?)?),
            "namespace" => self.namespace = Some(string_value(&meta)?.value()),
            "parent" => self.parent = Some(string_value(&meta)?.value()),
            "abstract" => self.is_abstract = true,
            "base" => self.base = true,
            "no_binding" => self.no_binding = true,
            "not_instantiable" => self.not_instantiable = true,
            "flavor" => self.flavor = Some(parse_flavor(&string_value(&meta)?)?),
            "event_type" => self.event_type = Some(string_value(&meta)?.value()),
            "companion" => self.companion = Some(string_value(&meta)?.value()),
            "soft_deleted_column" => self.soft_deleted_column = Some(string_value(&meta)?.value()),
            "no_view" => self.no_view = true,
            "constants" => meta.parse_nested_meta(|inner| {
                let name = inner
                    .path
                    .get_ident()
                    .map(|i| i.to_string())
                    .ok_or_else(|| inner.error("expected a constant name"))?;
                let value = string_value(&inner)?.value();
                self.constants.push((name, value));
                Ok(())
            })?,
            other => return Err(meta.error(format!("unsupported schema key `{other}`"))),
        }
        Ok(())
    }

    fn into_descriptor(
        self,
        ident: &syn::Ident,
        default_namespace: &str,
    ) -> syn::Result<TypeDescriptor> {
        let Some(category) = self.category else {
            return Err(syn::Error::new_spanned(
                ident,
                "missing `category` in #[schema]",
            ));
        };
        let name = ident.to_string();

        let namespace = self.namespace.as_deref().unwrap_or(default_namespace);
        let qualified = if namespace.is_empty() {
            name.clone()
        } else {
            format!("{namespace}.{name}")
        };

        let mut descriptor = TypeDescriptor::new(name, qualified, category);
        descriptor.parent = self.parent;
        descriptor.is_abstract = self.is_abstract;
        descriptor.base = self.base;
        descriptor.no_binding = self.no_binding;
        descriptor.instantiable = !self.not_instantiable;
        descriptor.flavor = self.flavor;
        descriptor.event_type = self.event_type;
        for (name, value) in self.constants {
            descriptor = descriptor.with_constant(name, value);
        }
        if let Some(companion) = self.companion {
            let mut extended = ExtendedObject::new(companion);
            if let Some(column) = self.soft_deleted_column {
                extended.soft_deleted_column = column;
            }
            extended.need_view = !self.no_view;
            descriptor.extended_object = Some(extended);
        }
        Ok(descriptor)
    }
}

fn string_value(meta: &ParseNestedMeta<'_>) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

fn parse_category(lit: &LitStr) -> syn::Result<Category> {
    Ok(match lit.value().as_str() {
        "message" => Category::Message,
        "event" => Category::Event,
        "reply" => Category::Reply,
        "inventory" => Category::Inventory,
        "config" => Category::Config,
        "persisted_entity" => Category::PersistedEntity,
        other => {
            return Err(syn::Error::new(lit.span(), format!("unknown category '{other}'")));
        }
    })
}

fn parse_flavor(lit: &LitStr) -> syn::Result<Flavor> {
    Ok(match lit.value().as_str() {
        "search" => Flavor::Search,
        "list" => Flavor::List,
        "get" => Flavor::Get,
        "delete" => Flavor::Delete,
        other => return Err(syn::Error::new(lit.span(), format!("unknown flavor '{other}'"))),
    })
}

fn parse_reference_option(lit: &LitStr) -> syn::Result<ReferenceOption> {
    Ok(match lit.value().to_ascii_lowercase().as_str() {
        "restrict" => ReferenceOption::Restrict,
        "cascade" => ReferenceOption::Cascade,
        "set_null" | "set null" => ReferenceOption::SetNull,
        "no_action" | "no action" => ReferenceOption::NoAction,
        other => {
            return Err(syn::Error::new(
                lit.span(),
                format!("unknown reference option '{other}'"),
            ));
        }
    })
}

fn from_struct(s: &syn::ItemStruct, namespace: &str) -> syn::Result<TypeDescriptor> {
    let attrs = SchemaAttrs::parse(&s.attrs)?;
    let mut descriptor = attrs.into_descriptor(&s.ident, namespace)?;

    match &s.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                descriptor.fields.push(field_from_syn(field)?);
            }
        }
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &s.ident,
                "tuple structs cannot be schema types",
            ));
        }
        Fields::Unit => {}
    }
    Ok(descriptor)
}

fn from_enum(e: &syn::ItemEnum, namespace: &str) -> syn::Result<TypeDescriptor> {
    let attrs = SchemaAttrs::parse(&e.attrs)?;
    let values: Vec<String> = e.variants.iter().map(|v| v.ident.to_string()).collect();
    Ok(attrs
        .into_descriptor(&e.ident, namespace)?
        .with_enum_values(values))
}

fn field_from_syn(field: &syn::Field) -> syn::Result<FieldDescriptor> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "field must have a name"));
    };
    let (kind, value_type) = classify(&field.ty)?;
    let mut descriptor = FieldDescriptor::new(ident.to_string(), kind);
    descriptor.value_type = value_type;

    let mut valid_values = Vec::new();
    let mut foreign_key: Option<ForeignKey> = None;
    let mut parent_key = None;
    let mut on_delete = None;
    let mut on_update = None;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
        attr.parse_nested_meta(|meta| {
            let Some(key) = meta.path.get_ident().map(|i| i.to_string()) else {
                return Err(meta.error("expected a field key"));
            };
            match key.as_str() {
                "required" => descriptor.required = true,
                "hidden" => descriptor.hidden = true,
                "transient" => descriptor.column = false,
                "index" => descriptor.index = true,
                "value_type" => descriptor.value_type = Some(string_value(&meta)?.value()),
                "valid_values" => valid_values = string_array(&meta)?,
                "foreign_key" => foreign_key = Some(ForeignKey::new(string_value(&meta)?.value())),
                "parent_key" => parent_key = Some(string_value(&meta)?.value()),
                "on_delete" => on_delete = Some(parse_reference_option(&string_value(&meta)?)?),
                "on_update" => on_update = Some(parse_reference_option(&string_value(&meta)?)?),
                other => return Err(meta.error(format!("unsupported field key `{other}`"))),
            }
            Ok(())
        })?;
    }

    if let Some(mut fk) = foreign_key {
        if let Some(key) = parent_key {
            fk.parent_key = key;
        }
        fk.on_delete = on_delete.unwrap_or_default();
        fk.on_update = on_update.unwrap_or_default();
        descriptor.foreign_key = Some(fk);
    } else if parent_key.is_some() || on_delete.is_some() || on_update.is_some() {
        return Err(syn::Error::new_spanned(
            ident,
            "foreign key options require `foreign_key`",
        ));
    }

    Ok(descriptor.with_valid_values(valid_values))
}

fn string_array(meta: &ParseNestedMeta<'_>) -> syn::Result<Vec<String>> {
    let array: syn::ExprArray = meta.value()?.parse()?;
    array
        .elems
        .iter()
        .map(|elem| match elem {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Str(s) => Ok(s.value()),
                _ => Err(syn::Error::new_spanned(elem, "expected a string literal")),
            },
            _ => Err(syn::Error::new_spanned(elem, "expected a string literal")),
        })
        .collect()
}

/// Shape and element type name of a field type
fn classify(ty: &Type) -> syn::Result<(FieldKind, Option<String>)> {
    let Type::Path(type_path) = ty else {
        return Err(syn::Error::new_spanned(
            ty,
            format!("unsupported field type `{}`", quote::quote!(#ty)),
        ));
    };
    let Some(segment) = type_path.path.segments.last() else {
        return Err(syn::Error::new_spanned(ty, "empty type path"));
    };

    let args: Vec<&Type> = match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(t) => Some(t),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    match (segment.ident.to_string().as_str(), args.as_slice()) {
        ("Option", [inner]) => classify(inner),
        ("Vec" | "HashSet" | "BTreeSet" | "VecDeque", [element]) => {
            Ok((FieldKind::Collection, type_name(element)))
        }
        ("HashMap" | "BTreeMap", [_, value]) => Ok((FieldKind::Map, type_name(value))),
        (name, _) => Ok((FieldKind::Scalar, Some(name.to_string()))),
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "source/source_tests.rs"]
mod source_tests;
