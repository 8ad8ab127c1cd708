//! TestLink requirement specification (`requirements.xml`)

use crate::model::{TypeModel, TypeModelNode};
use std::sync::Arc;

/// Escape text for XML content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Group nodes by namespace, in order of first appearance
fn by_namespace(model: &TypeModel) -> Vec<(&str, Vec<&Arc<TypeModelNode>>)> {
    let mut groups: Vec<(&str, Vec<&Arc<TypeModelNode>>)> = Vec::new();
    for node in model.iter() {
        let namespace = node.descriptor().namespace();
        match groups.iter_mut().find(|(ns, _)| *ns == namespace) {
            Some((_, nodes)) => nodes.push(node),
            None => groups.push((namespace, vec![node])),
        }
    }
    groups
}

fn write_requirement(node: &TypeModelNode, out: &mut String) {
    let required: Vec<&str> = node
        .all_visible_fields()
        .into_iter()
        .filter(|f| f.required)
        .map(|f| f.name.as_str())
        .collect();
    let description = if required.is_empty() {
        "No required fields".to_string()
    } else {
        format!("Required fields: {}", required.join(", "))
    };

    out.push_str("    <requirement>\n");
    out.push_str(&format!(
        "      <docid>{}</docid>\n",
        escape_xml(node.qualified_name())
    ));
    out.push_str(&format!("      <title>{}</title>\n", escape_xml(node.name())));
    out.push_str(&format!(
        "      <description>{}</description>\n",
        escape_xml(&description)
    ));
    out.push_str("    </requirement>\n");
}

/// Render one `<req-spec>` per namespace of the messages in `model`
pub fn render_requirements(model: &TypeModel) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<requirement-specification>\n");
    for (namespace, nodes) in by_namespace(model) {
        let title = escape_xml(namespace);
        out.push_str(&format!(
            "  <req-spec title=\"{title}\" doc_id=\"{title}\">\n"
        ));
        for node in nodes {
            write_requirement(node, &mut out);
        }
        out.push_str("  </req-spec>\n");
    }
    out.push_str("</requirement-specification>\n");
    out
}
