//! Per-session emission memo

use crate::error::GenerateResult;
use crate::model::TypeModelNode;
use std::collections::HashSet;

/// Names already written to the current artifact set
///
/// Owned by one generation session and passed by `&mut` to every emitter.
#[derive(Debug, Default)]
pub struct EmissionMemo {
    emitted: HashSet<String>,
    order: Vec<String>,
}

impl EmissionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_emitted(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }

    /// Record `name`; returns false if it was already recorded
    pub fn mark_emitted(&mut self, name: &str) -> bool {
        if !self.emitted.insert(name.to_string()) {
            return false;
        }
        self.order.push(name.to_string());
        true
    }

    /// Forget everything; called at session start
    pub fn reset(&mut self) {
        self.emitted.clear();
        self.order.clear();
    }

    /// Names in the order they were first recorded
    pub fn emitted(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Emit `node`, preceded by every ancestor not yet in the memo
///
/// Returns false without rendering anything when `node` itself was already
/// emitted, for example as the ancestor of an earlier type.
pub fn emit_with_ancestors<F>(
    node: &TypeModelNode,
    memo: &mut EmissionMemo,
    out: &mut String,
    mut render: F,
) -> GenerateResult<bool>
where
    F: FnMut(&TypeModelNode, &mut String) -> GenerateResult<()>,
{
    if memo.is_emitted(node.name()) {
        return Ok(false);
    }

    for ancestor in node.ancestors() {
        if memo.is_emitted(ancestor.name()) {
            continue;
        }
        render(ancestor, out)?;
        memo.mark_emitted(ancestor.name());
        tracing::debug!(type_name = ancestor.name(), "emitted ancestor");
    }

    render(node, out)?;
    memo.mark_emitted(node.name());
    tracing::debug!(type_name = node.name(), "emitted type");
    Ok(true)
}
