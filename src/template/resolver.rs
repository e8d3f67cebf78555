//! Template resolution - merges inherited values into an object's slots

use std::collections::BTreeSet;

use crate::model::property::{is_additive, strip_additive};
use crate::model::{is_transferable, ChainLink, InheritanceEntry, ObjectRecord};

use super::diagnostics::{Diagnostics, InheritanceDiagnostic};
use super::registry::{TemplateIndex, TemplateRegistry};

/// Resolve every transferable property of `object` against its chain.
///
/// Donors are consulted in chain order. The first non-additive value settles a
/// property; additive values accumulate until then, joined with `,`. A value
/// the object declared itself, unless additive, is never overwritten, but
/// donors that also hold a value still appear in the slot's history.
///
/// The chain is drained and the object marked resolved. Returns the number of
/// properties that took a value from a template.
pub fn resolve(
    object: &mut ObjectRecord,
    index: &TemplateIndex<'_>,
    diagnostics: &mut Diagnostics,
) -> usize {
    if object.is_resolved() {
        object.chain.clear();
        return 0;
    }

    let chain = std::mem::take(&mut object.chain);
    let donors: Vec<(&ChainLink, &ObjectRecord)> = chain
        .iter()
        .filter_map(|link| match index.get(&object.kind, &link.template) {
            Some(donor) => Some((link, donor)),
            None => {
                tracing::debug!(template = %link.template, "chain entry no longer registered");
                None
            }
        })
        .collect();

    let mut keys: BTreeSet<String> = object
        .property_names()
        .filter(|key| is_transferable(key))
        .map(str::to_string)
        .collect();
    for (_, donor) in &donors {
        keys.extend(
            donor
                .properties()
                .filter(|(key, slot)| is_transferable(key) && slot.is_set())
                .map(|(key, _)| key.to_string()),
        );
    }

    let id = object.display_id();
    let mut inherited = 0;
    for key in &keys {
        if resolve_property(object, &id, key, &donors, diagnostics) {
            inherited += 1;
        }
    }

    object.mark_resolved();
    tracing::debug!(object = %id, inherited, "object resolved");
    inherited
}

/// Resolve one property; true when a donor supplied (part of) the value
fn resolve_property(
    object: &mut ObjectRecord,
    id: &str,
    key: &str,
    donors: &[(&ChainLink, &ObjectRecord)],
    diagnostics: &mut Diagnostics,
) -> bool {
    let mut log = Vec::new();
    let slot = object.slot_mut(key);

    let own_additive = slot.is_additive();
    let mut settled = slot.is_set() && !own_additive;
    let mut pending = own_additive.then(|| strip_additive(slot.value()).to_string());
    let mut contributed = false;

    for (link, donor) in donors {
        let Some(value) = donor.property(key).map(|s| s.value()).filter(|v| !v.is_empty()) else {
            continue;
        };

        slot.record(&link.template);
        log.push(InheritanceEntry {
            priority: link.priority,
            property: key.to_string(),
            value: value.to_string(),
            donor: link.template.clone(),
        });

        if settled {
            continue;
        }
        contributed = true;

        match (pending.take(), is_additive(value)) {
            (Some(acc), true) => pending = Some(format!("{},{}", acc, strip_additive(value))),
            (Some(acc), false) => {
                slot.set_value(format!("{},{}", acc, value));
                settled = true;
            }
            (None, true) => pending = Some(strip_additive(value).to_string()),
            (None, false) => {
                slot.set_value(value);
                settled = true;
            }
        }
    }

    if let Some(acc) = pending {
        if own_additive && !contributed {
            diagnostics.report(InheritanceDiagnostic::MalformedAdditiveValue {
                object: id.to_string(),
                property: key.to_string(),
                value: slot.value().to_string(),
            });
        }
        slot.set_value(acc);
    }

    object.inheritance_log.extend(log);
    contributed
}

/// Order in which objects must be resolved so every donor is final before use.
///
/// Pure templates come first, then templates that use other templates with
/// parents ahead of children, then everything else in source order.
pub fn resolution_order(objects: &[ObjectRecord], registry: &TemplateRegistry) -> Vec<usize> {
    let mut state = vec![Visit::Fresh; objects.len()];
    let mut order = Vec::with_capacity(objects.len());

    for (i, object) in objects.iter().enumerate() {
        if object.is_template() && !object.uses_templates() {
            state[i] = Visit::Done;
            order.push(i);
        }
    }

    for (i, object) in objects.iter().enumerate() {
        if object.is_template() {
            visit(i, objects, registry, &mut state, &mut order);
        }
    }

    for (i, mark) in state.iter_mut().enumerate() {
        if *mark == Visit::Fresh {
            *mark = Visit::Done;
            order.push(i);
        }
    }

    order
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Fresh,
    InProgress,
    Done,
}

/// Post-order walk over direct uses; a back edge is skipped, the cycle itself
/// having been reported when chains were built
fn visit(
    i: usize,
    objects: &[ObjectRecord],
    registry: &TemplateRegistry,
    state: &mut [Visit],
    order: &mut Vec<usize>,
) {
    if state[i] != Visit::Fresh {
        return;
    }
    state[i] = Visit::InProgress;

    let object = &objects[i];
    for parent in &object.uses {
        if let Some(j) = registry.get(&object.kind, parent) {
            visit(j, objects, registry, state, order);
        }
    }

    state[i] = Visit::Done;
    order.push(i);
}
