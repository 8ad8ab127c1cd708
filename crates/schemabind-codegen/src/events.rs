//! Runtime event-type tags for event stubs

use crate::error::{GenerateError, GenerateResult};
use crate::model::TypeModelNode;

/// Constructs a concrete event type to read its runtime event-type tag
pub trait EventTypeFactory: Send + Sync {
    /// Event-type tag of `node`, or [`GenerateError::Instantiation`] when it cannot be built
    fn event_type(&self, node: &TypeModelNode) -> GenerateResult<String>;
}

/// Reads the tag from descriptor metadata
///
/// Uses the explicit `event_type` when declared, otherwise
/// `key.event.API.<qualified name>`. Types tagged non-instantiable fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorEventTypeFactory;

impl EventTypeFactory for DescriptorEventTypeFactory {
    fn event_type(&self, node: &TypeModelNode) -> GenerateResult<String> {
        let descriptor = node.descriptor();
        if !descriptor.instantiable {
            return Err(GenerateError::Instantiation {
                type_name: descriptor.qualified_name.clone(),
                reason: "type cannot be instantiated".to_string(),
            });
        }

        Ok(descriptor
            .event_type
            .clone()
            .unwrap_or_else(|| format!("key.event.API.{}", descriptor.qualified_name)))
    }
}
