//! Python data-class generation (`python/inventory.py`).
//!
//! The file is assembled in a fixed order: sentinel and helper classes, message
//! classes with the `api_names` manifest, inventory classes, constants, global
//! configuration classes. Extension writers are appended by the orchestrator.

use crate::error::GenerateResult;
use crate::memo::{EmissionMemo, emit_with_ancestors};
use crate::model::{TypeModel, TypeModelNode};
use crate::naming::{escape_single_quoted, full_name_constant, to_constant_name};
use schemabind_core::{FieldDescriptor, FieldKind};

/// Sentinel classes, in declaration order
pub const SENTINELS: [&str; 5] = [
    "NotNoneField",
    "NotNoneList",
    "OptionalList",
    "NotNoneMap",
    "OptionalMap",
];

/// Initializer value for a message field
///
/// Required fields get a required sentinel per kind; optional collections and
/// maps get their optional sentinel; optional scalars are absent.
pub fn sentinel(field: &FieldDescriptor) -> &'static str {
    match (field.kind, field.required) {
        (FieldKind::Scalar, true) => "NotNoneField()",
        (FieldKind::Collection, true) => "NotNoneList()",
        (FieldKind::Map, true) => "NotNoneMap()",
        (FieldKind::Collection, false) => "OptionalList()",
        (FieldKind::Map, false) => "OptionalMap()",
        (FieldKind::Scalar, false) => "None",
    }
}

/// Write the five sentinel classes
pub fn write_sentinels(out: &mut String) {
    for name in SENTINELS {
        out.push_str(&format!("\n\nclass {name}(object):"));
        out.push_str("\n    pass\n");
    }
}

/// Write the `Session` helper class
pub fn write_session(out: &mut String) {
    out.push_str("\nclass Session(object):");
    out.push_str("\n    def __init__(self):");
    out.push_str("\n        self.uuid = None");
    out.push_str("\n\n");
}

/// Write a flat helper class with every visible field absent
pub fn write_simple_class(node: &TypeModelNode, out: &mut String) {
    out.push_str(&format!("\nclass {}(object):", node.name()));
    out.push_str("\n    def __init__(self):");
    let fields = node.all_visible_fields();
    if fields.is_empty() {
        out.push_str("\n        pass");
    }
    for field in fields {
        out.push_str(&format!("\n        self.{} = None", field.name));
    }
    out.push_str("\n\n");
}

/// Write one message class (message mode)
pub fn write_message_class(node: &TypeModelNode, out: &mut String) {
    let name = node.name();
    let qualified = escape_single_quoted(node.qualified_name());

    out.push_str(&format!("\n{} = '{}'", full_name_constant(name), qualified));
    match node.parent() {
        Some(parent) => {
            out.push_str(&format!("\nclass {}({}):", name, parent.name()));
            out.push_str(&format!("\n    FULL_NAME='{qualified}'"));
            out.push_str("\n    def __init__(self):");
            out.push_str(&format!("\n        super({name}, self).__init__()"));
        }
        None => {
            out.push_str(&format!("\nclass {name}(object):"));
            out.push_str(&format!("\n    FULL_NAME='{qualified}'"));
            out.push_str("\n    def __init__(self):");
            if node.visible_fields().next().is_none() {
                out.push_str("\n        pass");
            }
        }
    }

    for field in node.visible_fields() {
        if field.required {
            out.push_str("\n        #mandatory field");
        }
        if !field.valid_values.is_empty() {
            out.push_str(&format!(
                "\n        #valid values: [{}]",
                field.valid_values.join(", ")
            ));
        }
        out.push_str(&format!("\n        self.{} = {}", field.name, sentinel(field)));
    }

    out.push_str("\n\n");
}

/// Write message classes parent-first and return the manifest of simple names
///
/// `model` holds the concrete message and reply types to list. Ancestors outside
/// the model are written once as dependencies and never listed; a model type
/// already written as another type's ancestor is skipped and not listed.
pub fn write_messages(
    model: &TypeModel,
    memo: &mut EmissionMemo,
    out: &mut String,
) -> GenerateResult<Vec<String>> {
    let mut names = Vec::new();
    for node in model.iter() {
        let emitted = emit_with_ancestors(node, memo, out, |n, buf| {
            write_message_class(n, buf);
            Ok(())
        })?;
        if emitted && !node.descriptor().base {
            names.push(node.name().to_string());
        }
    }
    Ok(names)
}

/// Write the `api_names` manifest list
pub fn write_api_names(names: &[String], out: &mut String) {
    out.push_str("\napi_names = [");
    for name in names {
        out.push_str(&format!("\n    '{}',", escape_single_quoted(name)));
    }
    out.push_str("\n]\n");
}

/// Write one inventory class (inventory mode)
pub fn write_inventory_class(node: &TypeModelNode, out: &mut String) {
    let name = node.name();
    let fields: Vec<&FieldDescriptor> = node.visible_fields().collect();

    match node.parent() {
        Some(parent) => {
            out.push_str(&format!("\nclass {}({}):", name, parent.name()));
            out.push_str("\n    def __init__(self):");
            out.push_str(&format!("\n        super({name}, self).__init__()"));
        }
        None => {
            out.push_str(&format!("\nclass {name}(object):"));
            out.push_str("\n    def __init__(self):");
            if fields.is_empty() {
                out.push_str("\n        pass");
            }
        }
    }
    for field in &fields {
        out.push_str(&format!("\n        self.{} = None", field.name));
    }

    out.push_str("\n\n    def evaluate(self, inv):");
    match node.parent() {
        Some(_) => out.push_str(&format!("\n        super({name}, self).evaluate(inv)")),
        None if fields.is_empty() => out.push_str("\n        pass"),
        None => {}
    }
    for field in &fields {
        out.push_str(&format!("\n        if hasattr(inv, '{}'):", field.name));
        out.push_str(&format!("\n            self.{0} = inv.{0}", field.name));
        out.push_str("\n        else:");
        out.push_str(&format!("\n            self.{} = None\n", field.name));
    }

    out.push_str("\n\n");
}

/// Write inventory classes parent-first
pub fn write_inventories(
    model: &TypeModel,
    memo: &mut EmissionMemo,
    out: &mut String,
) -> GenerateResult<()> {
    for node in model.iter() {
        emit_with_ancestors(node, memo, out, |n, buf| {
            write_inventory_class(n, buf);
            Ok(())
        })?;
    }
    Ok(())
}

/// Write `NAME = 'value'` constants for enum values and exported constants
pub fn write_constants(model: &TypeModel, out: &mut String) {
    for node in model.iter() {
        let descriptor = node.descriptor();
        for value in &descriptor.enum_values {
            out.push_str(&format!(
                "\n{} = '{}'",
                to_constant_name(value),
                escape_single_quoted(value)
            ));
        }
        for constant in &descriptor.constants {
            out.push_str(&format!(
                "\n{} = '{}'",
                to_constant_name(&constant.name),
                escape_single_quoted(&constant.value)
            ));
        }
    }
}

/// Write one `GlobalConfig_<CATEGORY>` class per configuration type
///
/// The type's simple name is the category; its fields are the configuration names.
pub fn write_global_configs(model: &TypeModel, out: &mut String) {
    out.push('\n');
    for node in model.iter() {
        let category = node.name();
        out.push_str(&format!(
            "\nclass GlobalConfig_{}(object):",
            to_constant_name(category)
        ));
        for field in node.visible_fields() {
            out.push_str(&format!(
                "\n    {} = '{}'",
                to_constant_name(&field.name),
                escape_single_quoted(&field.name)
            ));
        }
        out.push('\n');
        out.push_str("\n    @staticmethod");
        out.push_str("\n    def get_category():");
        out.push_str(&format!(
            "\n        return '{}'\n",
            escape_single_quoted(category)
        ));
    }
}
