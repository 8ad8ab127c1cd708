//! Resolved, ancestor-linked type model
//!
//! [`ModelBuilder`] turns raw catalog descriptors into [`TypeModelNode`]s whose
//! parent links are fully resolved, and orders a selection of them so every
//! parent precedes its descendants.

use crate::error::{GenerateError, GenerateResult};
use schemabind_core::{
    CatalogError, Category, FieldDescriptor, Flavor, TagFilter, TypeCatalog, TypeDescriptor,
};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;

/// A descriptor linked to its resolved parent
#[derive(Debug)]
pub struct TypeModelNode {
    descriptor: TypeDescriptor,
    parent: Option<Arc<TypeModelNode>>,
}

impl TypeModelNode {
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Simple name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.descriptor.qualified_name
    }

    pub fn category(&self) -> Category {
        self.descriptor.category
    }

    pub fn parent(&self) -> Option<&Arc<TypeModelNode>> {
        self.parent.as_ref()
    }

    pub fn is_abstract(&self) -> bool {
        self.descriptor.is_abstract
    }

    /// Neither abstract nor a framework root
    pub fn is_concrete(&self) -> bool {
        !self.descriptor.is_abstract && !self.descriptor.base
    }

    /// Ancestors from the root down to the direct parent
    pub fn ancestors(&self) -> Vec<&TypeModelNode> {
        let mut chain = Vec::new();
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            chain.push(node);
            current = node.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Whether `name` is this type or one of its ancestors
    pub fn is_type_of(&self, name: &str) -> bool {
        self.name() == name || self.ancestors().iter().any(|a| a.name() == name)
    }

    /// Whether this type or any ancestor declares `flavor`
    pub fn has_flavor(&self, flavor: Flavor) -> bool {
        self.descriptor.flavor == Some(flavor)
            || self
                .ancestors()
                .iter()
                .any(|a| a.descriptor.flavor == Some(flavor))
    }

    /// Search, list or get flavored
    pub fn is_query(&self) -> bool {
        [Flavor::Search, Flavor::List, Flavor::Get]
            .into_iter()
            .any(|flavor| self.has_flavor(flavor))
    }

    /// Non-hidden fields declared by this type
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptor.fields.iter().filter(|f| !f.hidden)
    }

    /// Non-hidden fields of the whole chain, root first
    ///
    /// A field redeclared by a descendant keeps its first position and takes the
    /// descendant's declaration.
    pub fn all_visible_fields(&self) -> Vec<&FieldDescriptor> {
        let mut fields: Vec<&FieldDescriptor> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut chain = self.ancestors();
        chain.push(self);

        for node in chain {
            for field in &node.descriptor.fields {
                match positions.get(field.name.as_str()) {
                    Some(&i) => fields[i] = field,
                    None => {
                        positions.insert(field.name.as_str(), fields.len());
                        fields.push(field);
                    }
                }
            }
        }

        fields.retain(|f| !f.hidden);
        fields
    }
}

/// An ordered selection of resolved nodes; parents precede descendants
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    nodes: Vec<Arc<TypeModelNode>>,
}

impl TypeModel {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeModelNode>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeModelNode>> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Simple names in model order
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name()).collect()
    }

    /// Keep the nodes matching `predicate`, preserving order
    pub fn filter(&self, predicate: impl Fn(&TypeModelNode) -> bool) -> TypeModel {
        TypeModel {
            nodes: self
                .nodes
                .iter()
                .filter(|n| predicate(n))
                .cloned()
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[Arc<TypeModelNode>] {
        &self.nodes
    }
}

/// Resolves catalog descriptors into model nodes for one generation session
pub struct ModelBuilder {
    index: HashMap<String, TypeDescriptor>,
    positions: HashMap<String, usize>,
    resolved: HashMap<String, Arc<TypeModelNode>>,
    unresolvable: HashSet<String>,
    stack: Vec<String>,
    failures: Vec<CatalogError>,
}

impl ModelBuilder {
    /// Index every catalog entry
    ///
    /// Per-type failures are logged and remembered; any other failure aborts.
    pub fn new(catalog: &dyn TypeCatalog) -> GenerateResult<Self> {
        let mut builder = Self {
            index: HashMap::new(),
            positions: HashMap::new(),
            resolved: HashMap::new(),
            unresolvable: HashSet::new(),
            stack: Vec::new(),
            failures: Vec::new(),
        };

        let mut scan_failures = Vec::new();
        for (position, entry) in catalog.entries().into_iter().enumerate() {
            match entry {
                Ok(descriptor) => {
                    if builder.index.contains_key(&descriptor.name) {
                        tracing::warn!(
                            type_name = %descriptor.name,
                            "ignoring duplicate catalog entry"
                        );
                        continue;
                    }
                    builder.positions.insert(descriptor.name.clone(), position);
                    builder.index.insert(descriptor.name.clone(), descriptor);
                }
                Err(CatalogError::ScanFailure { type_name, reason }) => {
                    scan_failures.push((type_name, reason));
                }
                Err(other) => return Err(other.into()),
            }
        }
        for (type_name, reason) in scan_failures {
            builder.scan_failed(&type_name, &reason);
        }

        Ok(builder)
    }

    /// Descriptor of a successfully loaded type
    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.index.get(name)
    }

    /// Per-type failures recorded so far
    pub fn failures(&self) -> &[CatalogError] {
        &self.failures
    }

    /// Resolve a type and its whole ancestor chain
    ///
    /// Returns `Ok(None)` when the type or one of its ancestors cannot be loaded;
    /// the failure is logged and the type skipped.
    pub fn resolve(&mut self, name: &str) -> GenerateResult<Option<Arc<TypeModelNode>>> {
        self.stack.clear();
        self.resolve_on_stack(name)
    }

    fn resolve_on_stack(&mut self, name: &str) -> GenerateResult<Option<Arc<TypeModelNode>>> {
        if let Some(node) = self.resolved.get(name) {
            return Ok(Some(Arc::clone(node)));
        }
        if self.unresolvable.contains(name) {
            return Ok(None);
        }
        if self.stack.iter().any(|n| n == name) {
            let mut chain = self.stack.clone();
            chain.push(name.to_string());
            return Err(GenerateError::CyclicHierarchy { chain });
        }

        let Some(descriptor) = self.index.get(name).cloned() else {
            self.skip(name, "type not found in catalog");
            return Ok(None);
        };

        self.stack.push(name.to_string());
        let parent = match descriptor.parent.as_deref() {
            None => None,
            Some(parent_name) if !self.index.contains_key(parent_name) => {
                self.stack.pop();
                self.skip(name, &format!("parent {parent_name} not found"));
                return Ok(None);
            }
            Some(parent_name) => match self.resolve_on_stack(parent_name)? {
                Some(node) => Some(node),
                None => {
                    self.stack.pop();
                    self.skip(name, &format!("parent {parent_name} could not be resolved"));
                    return Ok(None);
                }
            },
        };
        self.stack.pop();

        let node = Arc::new(TypeModelNode { descriptor, parent });
        self.resolved.insert(name.to_string(), Arc::clone(&node));
        Ok(Some(node))
    }

    /// Resolve types matching the tag filters across `namespaces` into an ordered model
    pub fn select(
        &mut self,
        catalog: &dyn TypeCatalog,
        namespaces: &[String],
        include: &[TagFilter],
        exclude: &[TagFilter],
    ) -> GenerateResult<TypeModel> {
        let mut names = Vec::new();
        for namespace in namespaces {
            for entry in catalog.find_types_by_namespace(namespace, include, exclude) {
                match entry {
                    Ok(descriptor) => names.push(descriptor.name),
                    Err(CatalogError::ScanFailure { type_name, reason }) => {
                        self.scan_failed(&type_name, &reason);
                    }
                    Err(other) => return Err(other.into()),
                }
            }
        }
        self.build_model(names)
    }

    /// Resolve the named types into a model in parent-first, catalog-tie-broken order
    pub fn build_model(
        &mut self,
        names: impl IntoIterator<Item = String>,
    ) -> GenerateResult<TypeModel> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for name in names {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(node) = self.resolve(&name)? {
                nodes.push(node);
            }
        }

        Ok(TypeModel {
            nodes: topological_order(nodes, &self.positions),
        })
    }

    /// Record a failed catalog entry
    ///
    /// A name that also has a loaded declaration stays resolvable; only the
    /// failed entry is dropped.
    fn scan_failed(&mut self, name: &str, reason: &str) {
        if self.index.contains_key(name) {
            self.report(name, reason);
        } else {
            self.skip(name, reason);
        }
    }

    fn skip(&mut self, name: &str, reason: &str) {
        self.unresolvable.insert(name.to_string());
        self.report(name, reason);
    }

    fn report(&mut self, name: &str, reason: &str) {
        let already_reported = self.failures.iter().any(|f| {
            matches!(f, CatalogError::ScanFailure { type_name, .. } if type_name == name)
        });
        if already_reported {
            return;
        }
        tracing::warn!(type_name = name, reason, "skipping type that cannot be loaded");
        self.failures.push(CatalogError::scan_failure(name, reason));
    }
}

/// Order nodes so each follows its nearest selected ancestor; ties go to catalog order
fn topological_order(
    nodes: Vec<Arc<TypeModelNode>>,
    positions: &HashMap<String, usize>,
) -> Vec<Arc<TypeModelNode>> {
    let position =
        |node: &TypeModelNode| positions.get(node.name()).copied().unwrap_or(usize::MAX);
    let selected: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name(), i))
        .collect();

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut ready = BinaryHeap::new();
    for (i, node) in nodes.iter().enumerate() {
        let nearest = node
            .ancestors()
            .into_iter()
            .rev()
            .find_map(|a| selected.get(a.name()).copied());
        match nearest {
            Some(parent) => children.entry(parent).or_default().push(i),
            None => ready.push(Reverse((position(node), i))),
        }
    }

    let mut ordered = Vec::with_capacity(nodes.len());
    while let Some(Reverse((_, i))) = ready.pop() {
        ordered.push(Arc::clone(&nodes[i]));
        for child in children.remove(&i).unwrap_or_default() {
            ready.push(Reverse((position(&nodes[child]), child)));
        }
    }
    ordered
}
