//! Template inheritance
//!
//! Any object with a `name` property is a template; any object with a `use`
//! property inherits from the templates it lists. Resolution happens in two
//! passes over the whole object set:
//!
//! 1. [`build_chain`] linearizes each object's ancestry into a priority-ordered
//!    list of templates.
//! 2. [`resolve`] walks that list per property, filling unset slots and
//!    merging additive (`+`) values.
//!
//! ```text
//! define host {
//!     name            generic-host
//!     check_period    24x7
//!     contact_groups  admins
//!     register        0
//! }
//!
//! define host {
//!     host_name       web01
//!     use             generic-host
//!     contact_groups  +web-team      ; becomes "web-team,admins"
//! }
//! ```
//!
//! Problems along the way (unknown or cyclic references, duplicate template
//! names, additive values with nothing to extend) are recovered from locally
//! and collected as [`InheritanceDiagnostic`]s.

mod chain;
mod diagnostics;
mod registry;
mod resolver;

pub use chain::build_chain;
pub use diagnostics::{Diagnostics, InheritanceDiagnostic};
pub use registry::{TemplateError, TemplateIndex, TemplateRegistry};
pub use resolver::{resolution_order, resolve};
