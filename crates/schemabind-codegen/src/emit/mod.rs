//! Target emitters
//!
//! Each emitter renders text from an ordered [`crate::TypeModel`]; none of them
//! touch the filesystem. Emitters that write inheritance chains take the
//! session's [`crate::EmissionMemo`] so every type is written once, after its
//! ancestors.
//!
//! ```text
//!  TypeModel
//!     ├─→ [python]     → python/inventory.py
//!     ├─→ [json]       → json/<qualified>.json, python/api_messages.py
//!     ├─→ [actions]    → python/api_actions.py
//!     ├─→ [groovy]     → ApiConstants.groovy, ApiStubs.groovy
//!     ├─→ [typescript] → api.ts
//!     ├─→ [sql]        → view.sql, foreignKeys.sql, indexes.sql
//!     └─→ [document]   → requirements.xml
//! ```

pub mod actions;
pub mod document;
pub mod groovy;
pub mod json;
pub mod python;
pub mod sql;
pub mod typescript;
