//! Provenance report: where each value came from

use crate::model::ObjectRecord;

/// One line per set property:
/// `'<type>.<property>'  '<value>'  '[<history>]'`, grouped under a header
/// naming the object.
pub fn render_history<'a>(objects: impl IntoIterator<Item = &'a ObjectRecord>) -> String {
    let mut out = String::new();
    for object in objects {
        out.push_str(&format!("# {}\n", object.display_id()));
        for (key, slot) in object.properties().filter(|(_, slot)| slot.is_set()) {
            let history = slot
                .history()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "'{}.{}'  '{}'  '[{}]'\n",
                object.type_tag(),
                key,
                slot.value(),
                history
            ));
        }
    }
    out
}
