//! Configuration for config-file output

use serde::Deserialize;

/// Which property values an emitted object carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// Only properties the object declared itself
    #[default]
    Minimal,
    /// Every property with a value, inherited ones included
    Full,
}

/// Configuration options for emitted object definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    pub mode: EmitMode,

    /// Spaces before each property line
    pub indent: usize,

    /// Column width the key is padded to
    pub key_width: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            mode: EmitMode::Minimal,
            indent: 4,
            key_width: 30,
        }
    }
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: EmitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for [`EmitMode::Full`]
    pub fn full(self) -> Self {
        self.with_mode(EmitMode::Full)
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_key_width(mut self, width: usize) -> Self {
        self.key_width = width;
        self
    }
}
