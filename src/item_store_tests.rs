use super::*;
use crate::categories::SENTINEL_CATEGORY;
use crate::models::Amount;

fn make_item(id: &str, name: &str, category: &str) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity: Amount::Number(1.0),
        category: category.to_string(),
        price: Amount::Number(0.0),
        marketplaces: Vec::new(),
    }
}

fn sample_store() -> ItemStore {
    ItemStore::new(vec![
        make_item("1", "Laptop", "Electronics"),
        make_item("2", "Novel", "Books"),
        make_item("3", "Cookbook", "Books"),
        make_item("4", "Desk Lamp", "Home & Garden"),
    ])
}

fn names<'a>(items: impl Iterator<Item = &'a InventoryItem>) -> Vec<&'a str> {
    items.map(|i| i.name.as_str()).collect()
}

#[test]
fn add_appends_in_order() {
    let mut store = ItemStore::default();
    store.add(make_item("a", "First", "Toys"));
    store.add(make_item("b", "Second", "Toys"));
    assert_eq!(names(store.items().iter()), ["First", "Second"]);
}

#[test]
fn update_replaces_matching_item_in_place() {
    let mut store = sample_store();
    let mut edited = make_item("2", "Novel (signed)", "Books");
    edited.quantity = Amount::from("3");
    assert!(store.update(edited.clone()));
    assert_eq!(store.items()[1], edited);
    assert_eq!(store.len(), 4);
}

#[test]
fn update_of_unknown_id_is_silent_noop() {
    let mut store = sample_store();
    let before = store.clone();
    assert!(!store.update(make_item("missing", "Ghost", "Toys")));
    assert_eq!(store, before);
}

#[test]
fn update_only_touches_first_duplicate() {
    let mut store = ItemStore::new(vec![make_item("d", "One", "Toys"), make_item("d", "Two", "Toys")]);
    store.update(make_item("d", "Edited", "Toys"));
    assert_eq!(names(store.items().iter()), ["Edited", "Two"]);
    assert_eq!(store.duplicate_ids(), ["d"]);
}

#[test]
fn delete_removes_item_and_ignores_missing() {
    let mut store = sample_store();
    assert!(store.delete("3"));
    assert!(!store.delete("3"));
    assert!(store.get("3").is_none());
    assert_eq!(store.len(), 3);
}

#[test]
fn reassign_moves_every_matching_item() {
    let mut store = sample_store();
    assert_eq!(store.reassign_category("Books", SENTINEL_CATEGORY), 2);
    assert!(store.items().iter().all(|i| i.category != "Books"));
    assert_eq!(store.get("2").unwrap().category, SENTINEL_CATEGORY);
    assert_eq!(store.get("3").unwrap().category, SENTINEL_CATEGORY);
    assert_eq!(store.get("1").unwrap().category, "Electronics");
}

#[test]
fn filtered_empty_term_yields_all_in_order() {
    let store = sample_store();
    assert_eq!(names(store.filtered("")), ["Laptop", "Novel", "Cookbook", "Desk Lamp"]);
}

#[test]
fn filtered_matches_name_or_category_case_insensitively() {
    let store = sample_store();
    assert_eq!(names(store.filtered("BOOK")), ["Novel", "Cookbook"]);
    assert_eq!(names(store.filtered("lamp")), ["Desk Lamp"]);
    assert_eq!(names(store.filtered("garden")), ["Desk Lamp"]);
    assert_eq!(store.filtered("nothing here").count(), 0);
}

#[test]
fn filtered_agrees_with_brute_force() {
    let store = sample_store();
    for term in ["o", "E", "ook", "electronics", "x", " "] {
        let expected: Vec<&str> = store
            .items()
            .iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&term.to_lowercase())
                    || i.category.to_lowercase().contains(&term.to_lowercase())
            })
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names(store.filtered(term)), expected, "term {term:?}");
    }
}

#[test]
fn serializes_as_plain_array() {
    let store = ItemStore::new(vec![make_item("1", "Laptop", "Electronics")]);
    let json = serde_json::to_value(&store).unwrap();
    assert!(json.is_array());
    let back: ItemStore = serde_json::from_value(json).unwrap();
    assert_eq!(back, store);
}
