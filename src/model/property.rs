//! Property slots with provenance history

use std::fmt;

/// Prefix marking a value that appends to, rather than replaces, the inherited one
pub const ADDITIVE_MARKER: char = '+';

/// Who determined (or touched) a property's value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Set by the object itself
    Direct,
    /// Never assigned
    Unset,
    /// Contributed by the named ancestor template
    Template(String),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Direct => write!(f, "DIRECT"),
            Provenance::Unset => write!(f, "UNSET"),
            Provenance::Template(name) => write!(f, "{}", name),
        }
    }
}

/// One property's current value plus the ordered record of its contributors.
///
/// The history is append-only and never empty: a slot is born with exactly one
/// entry (`Direct` for a non-empty value, `Unset` otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySlot {
    value: String,
    history: Vec<Provenance>,
}

impl Default for PropertySlot {
    fn default() -> Self {
        Self::unset()
    }
}

impl PropertySlot {
    /// Create a slot for a value the object declared itself
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let origin = if value.is_empty() {
            Provenance::Unset
        } else {
            Provenance::Direct
        };
        Self {
            value,
            history: vec![origin],
        }
    }

    /// Create an empty slot
    pub fn unset() -> Self {
        Self::new(String::new())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn history(&self) -> &[Provenance] {
        &self.history
    }

    /// Whether the slot carries a non-empty value
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }

    /// Whether the value is an additive (`+`-prefixed) value
    pub fn is_additive(&self) -> bool {
        is_additive(&self.value)
    }

    /// Whether the object declared this property itself
    pub fn is_direct(&self) -> bool {
        self.history.first() == Some(&Provenance::Direct)
    }

    /// Most recent contributor
    pub fn latest(&self) -> &Provenance {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    /// Record a contribution from a donor template without touching the value
    pub fn record(&mut self, donor: &str) {
        self.history.push(Provenance::Template(donor.to_string()));
    }

    /// Replace the value; provenance is recorded separately via [`record`](Self::record)
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl fmt::Display for PropertySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Whether a raw value is additive
pub fn is_additive(value: &str) -> bool {
    value.starts_with(ADDITIVE_MARKER)
}

/// Value with a leading additive marker removed
pub fn strip_additive(value: &str) -> &str {
    value.strip_prefix(ADDITIVE_MARKER).unwrap_or(value)
}
