//! Raw type descriptors as returned by a type catalog

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role of a type within the generated API surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Request sent by a client
    Message,
    /// Asynchronous result published after a message completes
    Event,
    /// Synchronous reply to a message
    Reply,
    /// Read-only resource view returned inside events and replies
    Inventory,
    /// Global configuration category; fields are configuration names
    Config,
    /// Database-backed entity
    PersistedEntity,
}

impl Category {
    /// Whether types of this category belong to the request/response API
    pub fn is_api(&self) -> bool {
        matches!(self, Category::Message | Category::Event | Category::Reply)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Message => "message",
            Category::Event => "event",
            Category::Reply => "reply",
            Category::Inventory => "inventory",
            Category::Config => "config",
            Category::PersistedEntity => "persisted_entity",
        };
        f.write_str(name)
    }
}

/// Query/deletion flavor of a message; inherited by descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Search,
    List,
    Get,
    Delete,
}

/// Declared shape of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Scalar,
    Collection,
    Map,
}

/// Referential action of a foreign key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOption {
    Restrict,
    Cascade,
    SetNull,
    #[default]
    NoAction,
}

impl ReferenceOption {
    /// SQL spelling of the action
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferenceOption::Restrict => "RESTRICT",
            ReferenceOption::Cascade => "CASCADE",
            ReferenceOption::SetNull => "SET NULL",
            ReferenceOption::NoAction => "NO ACTION",
        }
    }
}

/// Foreign key declared on a persisted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Name of the referenced persisted entity
    pub parent_entity: String,

    /// Referenced column
    #[serde(default = "default_parent_key")]
    pub parent_key: String,

    #[serde(default)]
    pub on_delete: ReferenceOption,

    #[serde(default)]
    pub on_update: ReferenceOption,
}

impl ForeignKey {
    /// Reference `parent_entity.uuid` with no referential actions
    pub fn new(parent_entity: impl Into<String>) -> Self {
        Self {
            parent_entity: parent_entity.into(),
            parent_key: default_parent_key(),
            on_delete: ReferenceOption::default(),
            on_update: ReferenceOption::default(),
        }
    }

    /// Set the ON DELETE action
    pub fn on_delete(mut self, action: ReferenceOption) -> Self {
        self.on_delete = action;
        self
    }

    /// Set the ON UPDATE action
    pub fn on_update(mut self, action: ReferenceOption) -> Self {
        self.on_update = action;
        self
    }
}

/// Soft-deletion-aware projection over an always-available companion table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedObject {
    /// Companion table holding live and soft-deleted rows
    pub companion: String,

    /// Column that is non-null once a row is soft deleted
    #[serde(default = "default_soft_deleted_column")]
    pub soft_deleted_column: String,

    /// Whether a view should be generated for this type
    #[serde(default = "default_true")]
    pub need_view: bool,
}

impl ExtendedObject {
    /// Create an extended object over `companion` using the default deletion column
    pub fn new(companion: impl Into<String>) -> Self {
        Self {
            companion: companion.into(),
            soft_deleted_column: default_soft_deleted_column(),
            need_view: true,
        }
    }

    /// Opt out of view generation
    pub fn without_view(mut self) -> Self {
        self.need_view = false;
        self
    }
}

/// A named constant exported into the data-class bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDescriptor {
    pub name: String,
    pub value: String,
}

/// One field of a type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as it appears on the wire
    pub name: String,

    #[serde(default)]
    pub kind: FieldKind,

    /// Caller must supply a value
    #[serde(default)]
    pub required: bool,

    /// Never exposed in any generated artifact
    #[serde(default)]
    pub hidden: bool,

    /// Allowed values, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_values: Vec<String>,

    /// Element type name (`string`, `long`, `VmInventory`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Backed by a storage column
    #[serde(default = "default_true")]
    pub column: bool,

    /// Indexed storage column
    #[serde(default)]
    pub index: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

impl FieldDescriptor {
    /// Create an optional, visible field of the given kind
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            hidden: false,
            valid_values: Vec::new(),
            value_type: None,
            column: true,
            index: false,
            foreign_key: None,
        }
    }

    /// Create a scalar field
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Scalar)
    }

    /// Create a collection field
    pub fn collection(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Collection)
    }

    /// Create a map field
    pub fn map(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Map)
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set the allowed values; duplicates are dropped, first occurrence wins
    pub fn with_valid_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        self.valid_values = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        self
    }

    /// Set the element type name
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    /// Mark the field as not backed by a storage column
    pub fn transient(mut self) -> Self {
        self.column = false;
        self
    }

    /// Mark the storage column as indexed
    pub fn indexed(mut self) -> Self {
        self.index = true;
        self
    }

    /// Declare a foreign key on the storage column
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }
}

/// Catalog entry describing one generatable type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple name, unique within the catalog
    pub name: String,

    /// Dotted, namespace-qualified name
    pub qualified_name: String,

    /// Simple name of the parent type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    pub category: Category,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "enum")]
    pub is_enum: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<Flavor>,

    /// Framework root type; never listed in name manifests
    #[serde(default)]
    pub base: bool,

    /// Excluded from the data-class message pass
    #[serde(default)]
    pub no_binding: bool,

    /// An instance can be constructed to read its runtime event type
    #[serde(default = "default_true")]
    pub instantiable: bool,

    /// Explicit event-type tag; derived from the qualified name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstantDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_object: Option<ExtendedObject>,
}

impl TypeDescriptor {
    /// Create a concrete descriptor with no parent and no fields
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            parent: None,
            fields: Vec::new(),
            category,
            is_abstract: false,
            is_enum: false,
            flavor: None,
            base: false,
            no_binding: false,
            instantiable: true,
            event_type: None,
            enum_values: Vec::new(),
            constants: Vec::new(),
            extended_object: None,
        }
    }

    /// Set the parent type name
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark the type as abstract
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark the type as a framework root
    pub fn base_type(mut self) -> Self {
        self.base = true;
        self
    }

    /// Set the message flavor
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// Declare the type as an enum with the given values
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_enum = true;
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Append an exported constant
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.push(ConstantDescriptor {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Tag the type as an extended object
    pub fn with_extended_object(mut self, extended_object: ExtendedObject) -> Self {
        self.extended_object = Some(extended_object);
        self
    }

    /// Set an explicit event-type tag
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Mark the type as impossible to instantiate
    pub fn not_instantiable(mut self) -> Self {
        self.instantiable = false;
        self
    }

    /// Exclude the type from the data-class message pass
    pub fn without_binding(mut self) -> Self {
        self.no_binding = true;
        self
    }

    /// Namespace part of the qualified name (everything before the last dot)
    pub fn namespace(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map(|(ns, _)| ns)
            .unwrap_or("")
    }

    /// Whether the type lives in `namespace` or one of its sub-namespaces
    ///
    /// An empty namespace matches every type.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        in_namespace(&self.qualified_name, namespace)
    }

    /// Whether the type exports any constants into the bindings
    pub fn exports_constants(&self) -> bool {
        self.is_enum || !self.constants.is_empty()
    }

    /// Check structural rules that every provider must uphold
    pub fn validate(&self) -> CatalogResult<()> {
        let invalid = |reason: String| CatalogError::InvalidDescriptor {
            type_name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("type name cannot be empty".to_string()));
        }
        if self.qualified_name.trim().is_empty() {
            return Err(invalid("qualified name cannot be empty".to_string()));
        }
        if self.parent.as_deref() == Some(self.name.as_str()) {
            return Err(invalid("type cannot be its own parent".to_string()));
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("field name cannot be empty".to_string()));
            }
            if !names.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
        }

        Ok(())
    }
}

/// Whether `qualified_name` lives in `namespace` or one of its sub-namespaces
pub(crate) fn in_namespace(qualified_name: &str, namespace: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }
    match qualified_name.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

fn default_true() -> bool {
    true
}

fn default_parent_key() -> String {
    "uuid".to_string()
}

fn default_soft_deleted_column() -> String {
    "deleted".to_string()
}
