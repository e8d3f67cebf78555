//! Recoverable inheritance problems
//!
//! None of these abort a run. Each is logged where it is detected and kept so
//! callers can inspect what degraded.

use thiserror::Error;

/// A locally recovered inheritance problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InheritanceDiagnostic {
    /// A `use` entry names no known template; the entry is skipped
    #[error("{object} uses unknown template '{template}'")]
    UnknownTemplateReference { object: String, template: String },

    /// A template transitively uses itself; the chain is truncated at re-entry
    #[error("circular template reference: {}", .cycle.join(" -> "))]
    CyclicTemplateReference { object: String, cycle: Vec<String> },

    /// An additive value found nothing to merge with; the literal suffix is kept
    #[error("{object}: additive value '{value}' for '{property}' has no inherited value to extend")]
    MalformedAdditiveValue {
        object: String,
        property: String,
        value: String,
    },

    /// Two templates of the same kind share a name; the first definition wins
    #[error("duplicate template definition: {kind} '{name}'")]
    DuplicateTemplate { kind: String, name: String },
}

/// Collected diagnostics for one run
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<InheritanceDiagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep a diagnostic
    pub fn report(&mut self, diagnostic: InheritanceDiagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[InheritanceDiagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
