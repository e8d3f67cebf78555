//! Nagios object definition output

use crate::model::{ObjectRecord, PropertySlot, IDENTITY_PROPERTIES};

use super::config::{EmitConfig, EmitMode};

/// Build `define` blocks incrementally
pub struct CfgBuilder {
    config: EmitConfig,
    blocks: Vec<String>,
}

impl CfgBuilder {
    pub fn new(config: EmitConfig) -> Self {
        Self {
            config,
            blocks: vec![],
        }
    }

    fn indent_str(&self) -> String {
        " ".repeat(self.config.indent)
    }

    fn wants(&self, slot: &PropertySlot) -> bool {
        slot.is_set()
            && match self.config.mode {
                EmitMode::Full => true,
                EmitMode::Minimal => slot.is_direct(),
            }
    }

    /// Add one object as a `define` block
    pub fn add_object(&mut self, object: &ObjectRecord) {
        let indent = self.indent_str();
        let mut block = format!("define {} {{\n", object.type_tag());

        for key in ordered_keys(object) {
            let Some(slot) = object.property(key).filter(|slot| self.wants(slot)) else {
                continue;
            };
            let width = self.config.key_width.max(key.len() + 1);
            block.push_str(&format!(
                "{}{:<width$}{}\n",
                indent,
                key,
                slot.value(),
                width = width
            ));
        }

        block.push('}');
        self.blocks.push(block);
    }

    /// Blocks separated by blank lines, with a trailing newline
    pub fn build(self) -> String {
        let mut out = self.blocks.join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Identity keys, then the kind's schema fields, then everything else by name
fn ordered_keys(object: &ObjectRecord) -> Vec<&str> {
    let schema = object.kind.fields();
    let mut keys: Vec<&str> = IDENTITY_PROPERTIES
        .iter()
        .chain(schema.iter())
        .copied()
        .filter(|key| object.property(key).is_some())
        .collect();
    // property names iterate in sorted order
    keys.extend(
        object
            .property_names()
            .filter(|key| !IDENTITY_PROPERTIES.contains(key) && !schema.contains(key)),
    );
    keys
}

/// Render one object definition
pub fn render_object(object: &ObjectRecord, config: &EmitConfig) -> String {
    let mut builder = CfgBuilder::new(config.clone());
    builder.add_object(object);
    builder.build()
}

/// Render a list of object definitions
pub fn render_objects<'a>(
    objects: impl IntoIterator<Item = &'a ObjectRecord>,
    config: &EmitConfig,
) -> String {
    let mut builder = CfgBuilder::new(config.clone());
    for object in objects {
        builder.add_object(object);
    }
    builder.build()
}
