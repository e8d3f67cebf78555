//! Object model: property slots, object records, and per-kind schemas

pub mod object;
pub mod property;
pub mod schema;

pub use object::{parse_use_list, ChainLink, InheritanceEntry, ObjectRecord};
pub use property::{PropertySlot, Provenance, ADDITIVE_MARKER};
pub use schema::{is_transferable, ObjectKind, IDENTITY_PROPERTIES};
