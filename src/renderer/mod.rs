//! Text renderers for resolved objects
//!
//! [`render_objects`] writes Nagios `define` blocks back out; [`render_history`]
//! writes a per-property provenance report.

pub mod config;
mod history;
mod text;

pub use config::{EmitConfig, EmitMode};
pub use history::render_history;
pub use text::{render_object, render_objects, CfgBuilder};
