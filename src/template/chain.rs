//! Linearization of an object's template ancestry

use std::collections::HashSet;

use crate::model::{ChainLink, ObjectRecord};

use super::diagnostics::{Diagnostics, InheritanceDiagnostic};
use super::registry::TemplateIndex;

/// A name waiting to be expanded, with the position of the entry that named it
#[derive(Debug)]
struct Pending {
    name: String,
    parent: Option<usize>,
}

/// Build the ordered ancestor chain of `object`.
///
/// Expansion is breadth-first: the object's direct parents come first in the
/// order they were written, then their parents, and so on. Each template
/// appears once, at its first (highest priority) position. Unknown names are
/// reported and skipped. A name that re-enters its own expansion path is
/// reported as a cycle and not expanded again.
pub fn build_chain(
    object: &ObjectRecord,
    index: &TemplateIndex<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<ChainLink> {
    if !object.uses_templates() {
        return Vec::new();
    }

    let mut expansion: Vec<Pending> = object
        .uses
        .iter()
        .map(|name| Pending {
            name: name.trim().to_string(),
            parent: None,
        })
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut chain = Vec::new();
    let mut cursor = 0;

    while cursor < expansion.len() {
        let position = cursor;
        cursor += 1;

        let name = expansion[position].name.clone();
        if name.is_empty() {
            continue;
        }

        if let Some(cycle) = cycle_through(object, &expansion, position) {
            diagnostics.report(InheritanceDiagnostic::CyclicTemplateReference {
                object: object.display_id(),
                cycle,
            });
            continue;
        }

        if !seen.insert(name.clone()) {
            tracing::trace!(object = %object.display_id(), template = %name, "already in chain");
            continue;
        }

        let Some(template) = index.get(&object.kind, &name) else {
            diagnostics.report(InheritanceDiagnostic::UnknownTemplateReference {
                object: object.display_id(),
                template: name,
            });
            continue;
        };

        expansion.extend(template.uses.iter().map(|parent| Pending {
            name: parent.trim().to_string(),
            parent: Some(position),
        }));
        chain.push(ChainLink::new(position + 1, name));
    }

    tracing::debug!(
        object = %object.display_id(),
        chain = ?chain.iter().map(|link| link.template.as_str()).collect::<Vec<_>>(),
        "template chain built"
    );
    chain
}

/// If the entry at `position` names the object itself or one of the templates
/// that led to it, return the path that closes the loop
fn cycle_through(object: &ObjectRecord, expansion: &[Pending], position: usize) -> Option<Vec<String>> {
    let name = &expansion[position].name;

    let mut path = vec![name.clone()];
    let mut closes = object.name.as_deref() == Some(name.as_str());
    let mut current = expansion[position].parent;
    while let Some(parent) = current {
        let ancestor = &expansion[parent];
        path.push(ancestor.name.clone());
        if &ancestor.name == name {
            closes = true;
            break;
        }
        current = ancestor.parent;
    }

    if !closes {
        return None;
    }
    if current.is_none() {
        // loop closes on the object itself
        path.push(object.name.clone().unwrap_or_else(|| object.display_id()));
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectKind;
    use crate::template::registry::TemplateRegistry;

    fn host_template(name: &str, uses: &str) -> ObjectRecord {
        let record = ObjectRecord::new(ObjectKind::Host).with_property("name", name);
        if uses.is_empty() {
            record
        } else {
            record.with_property("use", uses)
        }
    }

    fn chain_of(objects: &[ObjectRecord], target: usize) -> (Vec<String>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let registry = TemplateRegistry::collect_from_objects(objects, &mut diagnostics);
        let index = TemplateIndex::new(&registry, objects);
        let chain = build_chain(&objects[target], &index, &mut diagnostics);
        let names = chain.into_iter().map(|link| link.template).collect();
        (names, diagnostics)
    }

    #[test]
    fn test_no_uses_gives_empty_chain() {
        let objects = vec![host_template("base", "")];
        let (chain, diagnostics) = chain_of(&objects, 0);
        assert!(chain.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_breadth_first_order() {
        let objects = vec![
            host_template("a", "c"),
            host_template("b", "d"),
            host_template("c", ""),
            host_template("d", ""),
            ObjectRecord::new(ObjectKind::Host)
                .with_property("host_name", "web01")
                .with_property("use", "a,b"),
        ];
        let (chain, diagnostics) = chain_of(&objects, 4);
        assert_eq!(chain, vec!["a", "b", "c", "d"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_diamond_keeps_first_occurrence() {
        let objects = vec![
            host_template("left", "root"),
            host_template("right", "root"),
            host_template("root", ""),
            ObjectRecord::new(ObjectKind::Host).with_property("use", "left,right"),
        ];
        let (chain, diagnostics) = chain_of(&objects, 3);
        assert_eq!(chain, vec!["left", "right", "root"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_priorities_strictly_increase() {
        let objects = vec![
            host_template("a", "shared"),
            host_template("b", "shared"),
            host_template("shared", ""),
            ObjectRecord::new(ObjectKind::Host).with_property("use", "a,b"),
        ];
        let mut diagnostics = Diagnostics::new();
        let registry = TemplateRegistry::collect_from_objects(&objects, &mut diagnostics);
        let index = TemplateIndex::new(&registry, &objects);
        let chain = build_chain(&objects[3], &index, &mut diagnostics);
        assert!(chain.windows(2).all(|w| w[0].priority < w[1].priority));
    }

    #[test]
    fn test_unknown_template_is_reported_and_skipped() {
        let objects = vec![
            host_template("known", ""),
            ObjectRecord::new(ObjectKind::Host)
                .with_property("host_name", "web01")
                .with_property("use", "ghost, known"),
        ];
        let (chain, diagnostics) = chain_of(&objects, 1);
        assert_eq!(chain, vec!["known"]);
        assert_eq!(
            diagnostics.entries(),
            &[InheritanceDiagnostic::UnknownTemplateReference {
                object: "host_web01".into(),
                template: "ghost".into(),
            }]
        );
    }

    #[test]
    fn test_two_template_cycle_is_truncated() {
        let objects = vec![
            host_template("t1", "t2"),
            host_template("t2", "t1"),
            ObjectRecord::new(ObjectKind::Host)
                .with_property("host_name", "x")
                .with_property("use", "t1"),
        ];
        let (chain, diagnostics) = chain_of(&objects, 2);
        assert_eq!(chain, vec!["t1", "t2"]);
        assert_eq!(
            diagnostics.entries(),
            &[InheritanceDiagnostic::CyclicTemplateReference {
                object: "host_x".into(),
                cycle: vec!["t1".into(), "t2".into(), "t1".into()],
            }]
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let objects = vec![host_template("loop", "loop")];
        let (chain, diagnostics) = chain_of(&objects, 0);
        assert!(chain.is_empty());
        assert!(matches!(
            diagnostics.entries(),
            [InheritanceDiagnostic::CyclicTemplateReference { .. }]
        ));
    }

    #[test]
    fn test_templates_are_scoped_by_kind() {
        let objects = vec![
            ObjectRecord::new(ObjectKind::Service).with_property("name", "generic"),
            ObjectRecord::new(ObjectKind::Host).with_property("use", "generic"),
        ];
        let (chain, diagnostics) = chain_of(&objects, 1);
        assert!(chain.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }
}
