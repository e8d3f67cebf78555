//! Template inheritance through the public pipeline

use nagconf::{process_str, InheritanceDiagnostic, ObjectRecord, ObjectStore, Provenance};
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> ObjectStore {
    process_str(source).expect("Should process")
}

fn find<'a>(store: &'a ObjectStore, id: &str) -> &'a ObjectRecord {
    store
        .objects()
        .iter()
        .find(|o| o.display_id() == id)
        .unwrap_or_else(|| panic!("no object {id}"))
}

fn history(object: &ObjectRecord, key: &str) -> Vec<String> {
    object
        .property(key)
        .map(|slot| slot.history().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn test_object_without_uses_is_untouched() {
    let store = resolve(
        r#"
define host {
    host_name       lonely
    check_period    24x7
}
"#,
    );

    let host = find(&store, "host_lonely");
    assert!(host.chain.is_empty());
    assert!(host.inheritance_log.is_empty());
    assert_eq!(host.value("check_period"), "24x7");
    assert_eq!(history(host, "check_period"), vec!["DIRECT"]);
    assert_eq!(history(host, "alias"), vec!["UNSET"]);
}

#[test]
fn test_additive_merge() {
    let store = resolve(
        r#"
define host {
    name            t
    contact_groups  alpha
}
define host {
    host_name       x
    use             t
    contact_groups  +beta
}
"#,
    );

    let x = find(&store, "host_x");
    assert_eq!(x.value("contact_groups"), "beta,alpha");
    assert_eq!(history(x, "contact_groups"), vec!["DIRECT", "t"]);
    assert!(store.diagnostics().is_empty());
}

#[test]
fn test_first_listed_template_wins() {
    let store = resolve(
        r#"
define host {
    name                 t1
    notification_period  from-t1
}
define host {
    name                 t2
    notification_period  from-t2
}
define host {
    host_name            x
    use                  t1,t2
}
"#,
    );

    let x = find(&store, "host_x");
    assert_eq!(x.value("notification_period"), "from-t1");
    assert_eq!(history(x, "notification_period"), vec!["UNSET", "t1", "t2"]);
}

#[test]
fn test_multi_level_chain() {
    // x is defined before its templates; resolution order must not depend on it
    let store = resolve(
        r#"
define host {
    host_name   x
    use         t1
}
define host {
    name        t1
    use         t2
}
define host {
    name        t2
    alias       deep
}
"#,
    );

    assert_eq!(find(&store, "host_t1").value("alias"), "deep");
    let x = find(&store, "host_x");
    assert_eq!(x.value("alias"), "deep");
    assert_eq!(
        x.property("alias").unwrap().history(),
        &[
            Provenance::Unset,
            Provenance::Template("t1".into()),
            Provenance::Template("t2".into()),
        ]
    );
}

#[test]
fn test_repeated_template_kept_once() {
    let store = resolve(
        r#"
define host {
    name        base
    alias       Base
}
define host {
    name        mid
    use         base
}
define host {
    host_name   x
    use         mid, base
}
"#,
    );

    let x = find(&store, "host_x");
    // mid holds the inherited alias as well, so both contribute once each
    assert_eq!(history(x, "alias"), vec!["UNSET", "mid", "base"]);
    let donors: Vec<_> = x.inheritance_log.iter().map(|e| e.donor.as_str()).collect();
    assert_eq!(donors, vec!["mid", "base"]);
}

#[test]
fn test_cycle_terminates_and_is_reported() {
    let store = resolve(
        r#"
define host {
    name        t1
    use         t2
    alias       one
}
define host {
    name        t2
    use         t1
    address     10.0.0.2
}
define host {
    host_name   x
    use         t1
}
"#,
    );

    let x = find(&store, "host_x");
    assert_eq!(x.value("alias"), "one");
    assert_eq!(x.value("address"), "10.0.0.2");
    assert!(store
        .diagnostics()
        .iter()
        .any(|d| matches!(d, InheritanceDiagnostic::CyclicTemplateReference { object, .. } if object == "host_x")));
}

#[test]
fn test_unknown_reference_is_skipped() {
    let store = resolve(
        r#"
define host {
    name        real
    alias       Real
}
define host {
    host_name   x
    use         ghost,real
}
"#,
    );

    let x = find(&store, "host_x");
    assert_eq!(x.value("alias"), "Real");
    assert_eq!(
        store.diagnostics(),
        &[InheritanceDiagnostic::UnknownTemplateReference {
            object: "host_x".into(),
            template: "ghost".into(),
        }]
    );
}

#[test]
fn test_resolving_twice_changes_nothing() {
    let source = r#"
define service {
    name                generic-service
    check_interval      10
    contact_groups      admins
}
define service {
    host_name           web01
    service_description HTTP
    use                 generic-service
    contact_groups      +web
}
"#;
    let mut store = resolve(source);
    let first: Vec<_> = store.objects().to_vec();

    store.run();
    assert_eq!(store.objects(), first.as_slice());
    assert_eq!(
        find(&store, "service_web01___HTTP").value("contact_groups"),
        "web,admins"
    );
}

#[test]
fn test_identity_properties_stay_home() {
    let store = resolve(
        r#"
define contact {
    name        generic-contact
    register    0
    email       ops@example.com
}
define contact {
    contact_name  alice
    use           generic-contact
}
"#,
    );

    let alice = find(&store, "contact_alice");
    assert!(!alice.is_template());
    assert!(alice.property("register").is_none());
    assert_eq!(alice.value("email"), "ops@example.com");
}
