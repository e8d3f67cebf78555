//! Object records built from parsed blocks

use std::collections::BTreeMap;

use crate::parser::ast::Block;

use super::property::PropertySlot;
use super::schema::ObjectKind;

/// One ancestor in an object's linearized template chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    /// Expansion order; lower is higher priority
    pub priority: usize,
    pub template: String,
}

impl ChainLink {
    pub fn new(priority: usize, template: impl Into<String>) -> Self {
        Self {
            priority,
            template: template.into(),
        }
    }
}

/// Audit entry: a donor value consulted while resolving a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceEntry {
    pub priority: usize,
    pub property: String,
    pub value: String,
    pub donor: String,
}

/// A classified object: identity plus its property slots
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectRecord {
    pub kind: ObjectKind,
    /// Template name, present only for objects usable as templates
    pub name: Option<String>,
    /// Direct parents from the `use` directive, highest priority first
    pub uses: Vec<String>,
    /// Linearized ancestors; drained by the resolver
    pub chain: Vec<ChainLink>,
    pub inheritance_log: Vec<InheritanceEntry>,
    properties: BTreeMap<String, PropertySlot>,
    resolved: bool,
}

impl ObjectRecord {
    /// Create a record with an unset slot for every schema field
    pub fn new(kind: ObjectKind) -> Self {
        let properties = kind
            .fields()
            .iter()
            .map(|field| (field.to_string(), PropertySlot::unset()))
            .collect();
        Self {
            kind,
            name: None,
            uses: Vec::new(),
            chain: Vec::new(),
            inheritance_log: Vec::new(),
            properties,
            resolved: false,
        }
    }

    /// Classify a parsed block into a record
    pub fn from_block(block: &Block) -> Self {
        let kind = ObjectKind::from_tag(&block.kind.node);
        let mut record = Self::new(kind);

        for prop in &block.properties {
            let key = prop.node.key.node.as_str();
            let value = prop.node.value.node.as_str();

            if record.has_declared(key) {
                tracing::debug!(
                    kind = %record.kind,
                    key,
                    "property declared twice in one block, last value wins"
                );
            }
            if !record.kind.is_open() && !record.kind.has_field(key) && !is_identity_or_custom(key)
            {
                tracing::debug!(kind = %record.kind, key, "property outside the kind's schema");
            }

            record.declare(key, value);
        }

        record
    }

    /// Builder-style declaration, mostly for constructing records in code
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.declare(key, value);
        self
    }

    /// Set a property as declared by the object itself
    pub fn declare(&mut self, key: &str, value: &str) {
        let value = value.trim();
        self.properties
            .insert(key.to_string(), PropertySlot::new(value));
        match key {
            "name" => {
                self.name = Some(value.to_string()).filter(|n| !n.is_empty());
            }
            "use" => {
                self.uses = parse_use_list(value);
            }
            _ => {}
        }
    }

    fn has_declared(&self, key: &str) -> bool {
        self.properties.get(key).is_some_and(|s| s.is_direct())
    }

    /// The type tag on the `define` line
    pub fn type_tag(&self) -> &str {
        self.kind.tag()
    }

    pub fn is_template(&self) -> bool {
        self.name.is_some()
    }

    pub fn uses_templates(&self) -> bool {
        !self.uses.is_empty()
    }

    pub fn property(&self, key: &str) -> Option<&PropertySlot> {
        self.properties.get(key)
    }

    /// Value of a property, empty when absent or unset
    pub fn value(&self, key: &str) -> &str {
        self.properties.get(key).map(|s| s.value()).unwrap_or("")
    }

    /// Slot for a property, created unset if the object does not have it yet
    pub fn slot_mut(&mut self, key: &str) -> &mut PropertySlot {
        self.properties.entry(key.to_string()).or_default()
    }

    /// All slots, ordered by key
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertySlot)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(|k| k.as_str())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }

    /// Human readable identity for logs and reports
    pub fn display_id(&self) -> String {
        if let Some(name) = &self.name {
            return format!("{}_{}", self.type_tag(), name);
        }

        let ident = match self.kind {
            ObjectKind::Host | ObjectKind::HostExtInfo => self.value("host_name").to_string(),
            ObjectKind::Service | ObjectKind::ServiceEscalation => {
                let host = match self.value("host_name") {
                    "" => self.value("hostgroup_name"),
                    host => host,
                };
                let service = match self.value("service_description") {
                    "" => self.value("display_name"),
                    desc => desc,
                };
                format!("{}___{}", host, service)
            }
            ObjectKind::HostEscalation => {
                let host = match self.value("host_name") {
                    "" => self.value("hostgroup_name"),
                    host => host,
                };
                format!("{}___{}", host, self.value("contact_groups"))
            }
            _ => self
                .kind
                .fields()
                .first()
                .map(|field| self.value(field).to_string())
                .unwrap_or_default(),
        };

        if ident.is_empty() {
            format!("{}_genericuid_", self.type_tag())
        } else {
            format!("{}_{}", self.type_tag(), ident)
        }
    }
}

fn is_identity_or_custom(key: &str) -> bool {
    !super::schema::is_transferable(key) || key.starts_with('_')
}

/// Split a `use` value into template names: comma separated, trimmed, no blanks
pub fn parse_use_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
