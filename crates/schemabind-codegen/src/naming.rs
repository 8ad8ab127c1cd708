//! Naming convention utilities for the emitters.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `vm.cleanTraffic` | [`to_constant_name`] | `VM_CLEANTRAFFIC` |
//! | `APICreateVmMsg` | [`full_name_constant`] | `APICREATEVMMSG_FULL_NAME` |
//! | `APICreateVmMsg` | [`action_class_name`] | `CreateVmAction` |
//! | `it's` | [`escape_single_quoted`] | `it\'s` |

/// Convert an identifier or dotted name to an upper-case constant name.
///
/// Dots and dashes become underscores.
///
/// # Examples
///
/// ```
/// use schemabind_codegen::naming::to_constant_name;
///
/// assert_eq!(to_constant_name("vm.cleanTraffic"), "VM_CLEANTRAFFIC");
/// assert_eq!(to_constant_name("Running"), "RUNNING");
/// ```
pub fn to_constant_name(s: &str) -> String {
    s.replace(['.', '-'], "_").to_uppercase()
}

/// Name of the module-level constant holding a type's qualified name.
///
/// # Examples
///
/// ```
/// use schemabind_codegen::naming::full_name_constant;
///
/// assert_eq!(full_name_constant("Widget"), "WIDGET_FULL_NAME");
/// ```
pub fn full_name_constant(simple_name: &str) -> String {
    format!("{}_FULL_NAME", simple_name.to_uppercase())
}

/// Name of the action class wrapping a message type.
///
/// Strips a leading `API` and a trailing `Msg` or `Message`.
///
/// # Examples
///
/// ```
/// use schemabind_codegen::naming::action_class_name;
///
/// assert_eq!(action_class_name("APICreateVmMsg"), "CreateVmAction");
/// assert_eq!(action_class_name("Widget"), "WidgetAction");
/// ```
pub fn action_class_name(simple_name: &str) -> String {
    let name = simple_name.strip_prefix("API").unwrap_or(simple_name);
    let name = name
        .strip_suffix("Msg")
        .or_else(|| name.strip_suffix("Message"))
        .unwrap_or(name);
    let name = if name.is_empty() { simple_name } else { name };
    format!("{name}Action")
}

/// Escape a value for a single-quoted Python or Groovy string literal.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
