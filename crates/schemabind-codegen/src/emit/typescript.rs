//! TypeScript interface definitions (`api.ts`)
//!
//! The emitter does not filter its inputs; callers pass concrete types only.
//! Ancestors reached through the chain walk are written as well, once each.

use crate::error::GenerateResult;
use crate::memo::{EmissionMemo, emit_with_ancestors};
use crate::model::{TypeModel, TypeModelNode};
use schemabind_core::{FieldDescriptor, FieldKind};
use std::collections::HashSet;

/// The three type sets rendered into one definitions file
#[derive(Debug, Clone, Copy)]
pub struct InterfaceSets<'a> {
    pub messages: &'a TypeModel,
    pub events: &'a TypeModel,
    pub inventories: &'a TypeModel,
}

impl<'a> InterfaceSets<'a> {
    fn all(self) -> impl Iterator<Item = &'a TypeModel> {
        [self.messages, self.events, self.inventories].into_iter()
    }
}

/// TypeScript type for a declared value type
///
/// Names of generated interfaces pass through; unknown names become `any`.
pub fn ts_type(value_type: Option<&str>, known: &HashSet<String>) -> String {
    let Some(value_type) = value_type else {
        return "any".to_string();
    };
    match value_type.to_ascii_lowercase().as_str() {
        "string" | "str" | "char" | "uuid" | "date" | "timestamp" => "string".to_string(),
        "int" | "integer" | "long" | "short" | "byte" | "float" | "double" | "number" | "i8"
        | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "usize" | "f32" | "f64" => {
            "number".to_string()
        }
        "bool" | "boolean" => "boolean".to_string(),
        _ if known.contains(value_type) => value_type.to_string(),
        _ => "any".to_string(),
    }
}

fn field_type(field: &FieldDescriptor, known: &HashSet<String>) -> String {
    let element = ts_type(field.value_type.as_deref(), known);
    match field.kind {
        FieldKind::Scalar => element,
        FieldKind::Collection => format!("{element}[]"),
        FieldKind::Map => format!("{{[key: string]: {element}}}"),
    }
}

/// Write one `export interface`
pub fn write_interface(node: &TypeModelNode, known: &HashSet<String>, out: &mut String) {
    match node.parent() {
        Some(parent) => out.push_str(&format!(
            "export interface {} extends {} {{\n",
            node.name(),
            parent.name()
        )),
        None => out.push_str(&format!("export interface {} {{\n", node.name())),
    }
    for field in node.visible_fields() {
        let optional = if field.required { "" } else { "?" };
        out.push_str(&format!(
            "    {}{}: {};\n",
            field.name,
            optional,
            field_type(field, known)
        ));
    }
    out.push_str("}\n\n");
}

/// Render every set, in order, into one definitions file
pub fn render_interfaces(sets: InterfaceSets<'_>, memo: &mut EmissionMemo) -> GenerateResult<String> {
    let known: HashSet<String> = sets
        .all()
        .flat_map(|model| model.iter())
        .flat_map(|node| {
            node.ancestors()
                .into_iter()
                .map(|a| a.name().to_string())
                .chain(std::iter::once(node.name().to_string()))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut out = String::new();
    for model in sets.all() {
        for node in model.iter() {
            emit_with_ancestors(node, memo, &mut out, |n, buf| {
                write_interface(n, &known, buf);
                Ok(())
            })?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "typescript/typescript_tests.rs"]
mod typescript_tests;
