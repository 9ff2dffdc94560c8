use super::*;

#[test]
fn default_registry_ends_with_sentinel() {
    let registry = CategoryRegistry::default();
    assert_eq!(registry.len(), 7);
    assert_eq!(registry.names()[0], "Electronics");
    assert_eq!(registry.names().last().unwrap(), SENTINEL_CATEGORY);
    assert!(registry.invariant_holds());
}

#[test]
fn add_inserts_before_sentinel() {
    let mut registry = CategoryRegistry::empty();
    assert!(registry.add("Tools"));
    assert!(registry.add("Games"));
    assert_eq!(registry.names(), ["Tools", "Games", "Other"]);
}

#[test]
fn add_rejects_empty_sentinel_and_duplicates() {
    let mut registry = CategoryRegistry::default();
    let before = registry.clone();
    assert!(!registry.add(""));
    assert!(!registry.add(SENTINEL_CATEGORY));
    assert!(!registry.add("Books"));
    assert_eq!(registry, before);
}

#[test]
fn remove_never_touches_sentinel() {
    let mut registry = CategoryRegistry::default();
    assert!(!registry.remove(SENTINEL_CATEGORY));
    assert!(registry.invariant_holds());
}

#[test]
fn remove_deletes_named_category() {
    let mut registry = CategoryRegistry::default();
    assert!(registry.remove("Books"));
    assert!(!registry.contains("Books"));
    assert!(!registry.remove("Books"));
}

#[test]
fn from_names_repairs_saved_lists() {
    let registry = CategoryRegistry::from_names(["Other", "Tools", "", "Tools", "Other", "Games"]);
    assert_eq!(registry.names(), ["Tools", "Games", "Other"]);
    assert!(registry.invariant_holds());
}

#[test]
fn invariant_survives_mixed_operation_sequences() {
    let mut registry = CategoryRegistry::default();
    let script: &[(bool, &str)] = &[
        (true, "A"),
        (false, "Electronics"),
        (true, "Other"),
        (false, "Other"),
        (true, "B"),
        (true, "A"),
        (false, "A"),
        (false, "missing"),
        (true, ""),
        (false, "Toys"),
        (true, "C"),
    ];
    for (is_add, name) in script {
        if *is_add {
            registry.add(name);
        } else {
            registry.remove(name);
        }
        assert!(registry.invariant_holds(), "broken after {is_add} {name:?}: {:?}", registry.names());
    }
    assert_eq!(registry.names().last().unwrap(), "Other");
}

#[test]
fn serializes_as_plain_list() {
    let registry = CategoryRegistry::from_names(["Tools"]);
    assert_eq!(serde_json::to_string(&registry).unwrap(), r#"["Tools","Other"]"#);
}
