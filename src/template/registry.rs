//! Template registry: name lookup over the objects of a run

use std::collections::HashMap;
use thiserror::Error;

use crate::model::{ObjectKind, ObjectRecord};

use super::diagnostics::{Diagnostics, InheritanceDiagnostic};

/// Errors that can occur during template registration
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Duplicate template definition
    #[error("duplicate template definition: {kind} '{name}'")]
    Duplicate { kind: String, name: String },
}

/// Maps template names to positions in the object list.
///
/// Nagios keeps a separate template namespace per object kind, so a host
/// template and a service template may share a name.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<(ObjectKind, String), usize>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the object at `index` under its kind and name
    pub fn register(
        &mut self,
        kind: &ObjectKind,
        name: &str,
        index: usize,
    ) -> Result<(), TemplateError> {
        let key = (kind.clone(), name.to_string());
        if self.templates.contains_key(&key) {
            return Err(TemplateError::Duplicate {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
        self.templates.insert(key, index);
        Ok(())
    }

    /// Get the object position of a template
    pub fn get(&self, kind: &ObjectKind, name: &str) -> Option<usize> {
        self.templates.get(&(kind.clone(), name.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Collect every named object; duplicates keep the first definition
    pub fn collect_from_objects(objects: &[ObjectRecord], diagnostics: &mut Diagnostics) -> Self {
        let mut registry = Self::new();
        for (index, object) in objects.iter().enumerate() {
            let Some(name) = &object.name else {
                continue;
            };
            if let Err(TemplateError::Duplicate { kind, name }) =
                registry.register(&object.kind, name, index)
            {
                diagnostics.report(InheritanceDiagnostic::DuplicateTemplate { kind, name });
            }
        }
        tracing::debug!(templates = registry.len(), "template registry built");
        registry
    }
}

/// Read-only view resolving template names to their records
#[derive(Debug, Clone, Copy)]
pub struct TemplateIndex<'a> {
    registry: &'a TemplateRegistry,
    objects: &'a [ObjectRecord],
}

impl<'a> TemplateIndex<'a> {
    pub fn new(registry: &'a TemplateRegistry, objects: &'a [ObjectRecord]) -> Self {
        Self { registry, objects }
    }

    /// Get a template record by kind and name
    pub fn get(&self, kind: &ObjectKind, name: &str) -> Option<&'a ObjectRecord> {
        self.registry
            .get(kind, name)
            .and_then(|index| self.objects.get(index))
    }
}
