//! The authoritative, insertion-ordered collection of inventory items.
//!
//! Update and delete of an unknown id are silent no-ops. This is intentionally
//! permissive: a stale edit form must not fail the whole operation.

use crate::models::InventoryItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStore {
    items: Vec<InventoryItem>,
}

impl ItemStore {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Append an item. Id uniqueness is the caller's job (see [`crate::ids::IdMinter`]).
    pub fn add(&mut self, item: InventoryItem) {
        self.items.push(item);
    }

    /// Append a batch of items in order
    pub fn extend<I: IntoIterator<Item = InventoryItem>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Replace the first item with the same id. Returns false if none matched.
    pub fn update(&mut self, item: InventoryItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => {
                log::debug!("Update ignored, no item with id {}", item.id);
                false
            }
        }
    }

    /// Remove the item with the given id. Returns false if it was absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Move every item in category `from` to category `to`. Returns the number moved.
    pub fn reassign_category(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for item in self.items.iter_mut().filter(|item| item.category == from) {
            item.category = to.to_string();
            moved += 1;
        }
        moved
    }

    /// Items whose name or category contains `term`, case-insensitively,
    /// in insertion order. An empty term yields every item.
    pub fn filtered<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(move |item| term.is_empty() || item.matches_lowercase(&term))
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    /// Ids that occur more than once. Should always be empty.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.ids() {
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "item_store_tests.rs"]
mod tests;
