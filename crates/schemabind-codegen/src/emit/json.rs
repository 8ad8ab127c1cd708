//! JSON request templates and the qualified-name manifest

use crate::error::GenerateResult;
use crate::model::{TypeModel, TypeModelNode};
use crate::naming::escape_single_quoted;
use schemabind_core::FieldKind;
use serde_json::{Map, Value};

/// Empty value for a field of `kind`
fn template_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Scalar => Value::Null,
        FieldKind::Collection => Value::Array(Vec::new()),
        FieldKind::Map => Value::Object(Map::new()),
    }
}

/// `{ "<qualified>": { field: template } }` over all inherited visible fields
pub fn json_template(node: &TypeModelNode) -> GenerateResult<String> {
    let mut body = Map::new();
    for field in node.all_visible_fields() {
        body.insert(field.name.clone(), template_value(field.kind));
    }

    let mut root = Map::new();
    root.insert(node.qualified_name().to_string(), Value::Object(body));
    Ok(serde_json::to_string_pretty(&Value::Object(root))?)
}

/// File name of a type's template within `json/`
pub fn template_file_name(node: &TypeModelNode) -> String {
    format!("{}.json", node.qualified_name())
}

/// Contents of `python/api_messages.py`
pub fn api_messages(model: &TypeModel) -> String {
    let mut out = String::from("api_names = [\n");
    for node in model.iter() {
        out.push_str(&format!(
            "    '{}',\n",
            escape_single_quoted(node.qualified_name())
        ));
    }
    out.push_str("]\n");
    out
}
