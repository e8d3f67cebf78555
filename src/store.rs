//! The object store: every object of a run, plus the passes over them

use std::collections::BTreeMap;
use std::fmt;

use crate::model::ObjectRecord;
use crate::parser::Document;
use crate::template::{
    build_chain, resolution_order, resolve, Diagnostics, InheritanceDiagnostic, TemplateIndex,
    TemplateRegistry,
};

/// All objects of a run, in source order
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: Vec<ObjectRecord>,
    registry: TemplateRegistry,
    diagnostics: Diagnostics,
}

impl ObjectStore {
    /// Take ownership of classified records and index their templates
    pub fn new(objects: Vec<ObjectRecord>) -> Self {
        let mut diagnostics = Diagnostics::new();
        let registry = TemplateRegistry::collect_from_objects(&objects, &mut diagnostics);
        Self {
            objects,
            registry,
            diagnostics,
        }
    }

    /// Classify every block of the given documents
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let objects = documents
            .into_iter()
            .flat_map(|doc| doc.blocks.iter())
            .map(|block| ObjectRecord::from_block(&block.node))
            .collect();
        Self::new(objects)
    }

    /// Compute the template chain of every object not yet resolved
    pub fn build_chains(&mut self) {
        let chains: Vec<_> = {
            let index = TemplateIndex::new(&self.registry, &self.objects);
            self.objects
                .iter()
                .map(|object| {
                    (!object.is_resolved())
                        .then(|| build_chain(object, &index, &mut self.diagnostics))
                })
                .collect()
        };
        for (object, chain) in self.objects.iter_mut().zip(chains) {
            if let Some(chain) = chain {
                object.chain = chain;
            }
        }
    }

    /// Resolve every object, donors before their users.
    ///
    /// Returns the number of properties filled from templates.
    pub fn resolve_all(&mut self) -> usize {
        let mut inherited = 0;
        for i in resolution_order(&self.objects, &self.registry) {
            // donors are read from the list while the target is out of it
            let mut target = std::mem::take(&mut self.objects[i]);
            let index = TemplateIndex::new(&self.registry, &self.objects);
            inherited += resolve(&mut target, &index, &mut self.diagnostics);
            log_history(&target);
            self.objects[i] = target;
        }
        tracing::info!(
            objects = self.objects.len(),
            inherited,
            diagnostics = self.diagnostics.len(),
            "inheritance resolved"
        );
        inherited
    }

    /// Build chains, then resolve
    pub fn run(&mut self) -> usize {
        self.build_chains();
        self.resolve_all()
    }

    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<ObjectRecord> {
        self.objects
    }

    /// Objects usable as templates
    pub fn templates(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter().filter(|object| object.is_template())
    }

    pub fn diagnostics(&self) -> &[InheritanceDiagnostic] {
        self.diagnostics.entries()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total: self.objects.len(),
            ..StoreStats::default()
        };
        for object in &self.objects {
            *stats.by_kind.entry(object.type_tag().to_string()).or_default() += 1;
            if object.kind.is_classified() {
                stats.classified += 1;
            } else {
                stats.unclassified += 1;
            }
            if object.is_template() {
                stats.templates += 1;
            }
        }
        stats
    }
}

fn log_history(object: &ObjectRecord) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let id = object.display_id();
    for (key, slot) in object.properties().filter(|(_, slot)| slot.is_set()) {
        tracing::trace!(
            object = %id,
            property = key,
            value = slot.value(),
            history = ?slot.history().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "history chain"
        );
    }
}

/// Object counts for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub templates: usize,
    pub by_kind: BTreeMap<String, usize>,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "objects: {}", self.total)?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "  {:<20}{}", kind, count)?;
        }
        writeln!(f, "classified: {}", self.classified)?;
        writeln!(f, "unclassified: {}", self.unclassified)?;
        write!(f, "templates: {}", self.templates)
    }
}
