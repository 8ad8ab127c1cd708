//! Python action bindings (`python/api_actions.py`)
//!
//! Each concrete message gets an action class that subclasses the generated
//! message class and submits itself through the `api` module.

use crate::model::{TypeModel, TypeModelNode};
use crate::naming::action_class_name;

const HEADER: &str = "import inventory\nimport api\n";

/// Write one action class
pub fn write_action_class(node: &TypeModelNode, out: &mut String) {
    let action = action_class_name(node.name());
    let call = if node.is_query() {
        "sync_call"
    } else {
        "async_call"
    };

    out.push_str(&format!("\nclass {}(inventory.{}):", action, node.name()));
    out.push_str("\n    def __init__(self):");
    out.push_str(&format!("\n        super({action}, self).__init__()"));
    out.push_str("\n        self.sessionUuid = None");
    out.push_str("\n        self.out = None");
    out.push_str("\n\n    def run(self):");
    out.push_str(&format!("\n        evt = api.{call}(self, self.sessionUuid)"));
    out.push_str("\n        self.out = evt");
    out.push_str("\n        return self.out\n\n");
}

/// Contents of `python/api_actions.py` for every message in `model`
pub fn render_actions(model: &TypeModel) -> String {
    let mut out = String::from(HEADER);
    for node in model.iter() {
        write_action_class(node, &mut out);
    }
    out
}
