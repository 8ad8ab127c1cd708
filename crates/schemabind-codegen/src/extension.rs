//! Extension writers appended to the data-class bindings

use crate::error::GenerateResult;

/// Externally registered writer that appends to the data-class buffer
///
/// Writers run in registration order after every core section, each preceded
/// by a blank line.
pub trait BindingWriter: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &str;

    /// Append to the in-progress data-class buffer
    fn write_binding(&self, out: &mut String) -> GenerateResult<()>;
}
