//! Groovy stubs (`ApiStubs.groovy`) and the required-field directory
//! (`ApiConstants.groovy`).

use crate::error::GenerateResult;
use crate::events::EventTypeFactory;
use crate::memo::{EmissionMemo, emit_with_ancestors};
use crate::model::{TypeModel, TypeModelNode};
use crate::naming::{escape_single_quoted, to_constant_name};
use schemabind_core::Category;

/// Contents of `ApiConstants.groovy`
///
/// One `def NAME = [name: ..., requiredFields: [...]]` entry per type, with the
/// required fields taken from the whole visible ancestor chain.
pub fn render_constants(model: &TypeModel, package: &str, api_event_type: Option<&str>) -> String {
    let mut out = format!("package {package}\n\ninterface ApiConstants {{\n");
    if let Some(event_type) = api_event_type {
        out.push_str(&format!(
            "    def API_EVENT_TYPE = '{}'\n",
            escape_single_quoted(event_type)
        ));
    }

    for node in model.iter() {
        let required: Vec<String> = node
            .all_visible_fields()
            .into_iter()
            .filter(|f| f.required)
            .map(|f| format!("'{}'", f.name))
            .collect();
        out.push_str(&format!(
            "\n    def {} = [name: '{}',requiredFields: [{}]]\n",
            to_constant_name(node.name()),
            escape_single_quoted(node.qualified_name()),
            required.join(",")
        ));
    }

    out.push_str("\n}\n");
    out
}

/// Write one stub class
///
/// Concrete events also get an `eventType()` literal read through `events`.
pub fn write_stub_class(
    node: &TypeModelNode,
    events: &dyn EventTypeFactory,
    out: &mut String,
) -> GenerateResult<()> {
    match node.parent() {
        Some(parent) => out.push_str(&format!(
            "\npublic class {} extends {} {{",
            node.name(),
            parent.name()
        )),
        None => out.push_str(&format!("\npublic class {} {{", node.name())),
    }

    for field in node.visible_fields() {
        if field.required {
            out.push_str(&format!("\n    def {} = new NotNullObject()", field.name));
        } else {
            out.push_str(&format!("\n    def {}", field.name));
        }
    }

    out.push_str(&format!(
        "\n\n    def fullName() {{ return '{}' }}",
        escape_single_quoted(node.qualified_name())
    ));
    if node.category() == Category::Event && !node.is_abstract() {
        let event_type = events.event_type(node)?;
        out.push_str(&format!(
            "\n    def eventType() {{ return '{}' }}",
            escape_single_quoted(&event_type)
        ));
    }
    out.push_str("\n}\n\n");
    Ok(())
}

/// Contents of `ApiStubs.groovy`, parents before children
pub fn render_stubs(
    model: &TypeModel,
    package: &str,
    memo: &mut EmissionMemo,
    events: &dyn EventTypeFactory,
) -> GenerateResult<String> {
    let mut out = format!("package {package}\n\n");
    out.push_str("public class NotNullObject {}\n\n");
    for node in model.iter() {
        emit_with_ancestors(node, memo, &mut out, |n, buf| {
            write_stub_class(n, events, buf)
        })?;
    }
    Ok(out)
}
