//! Owner of the item list and category list, with load-on-open and
//! save-after-every-mutation persistence.
//!
//! Saves are best effort: a failed save is logged and the in-memory state
//! stays authoritative. A missing or corrupt persisted blob loads as "no data".

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::categories::{CategoryRegistry, SENTINEL_CATEGORY};
use crate::draft::ItemDraft;
use crate::error::{InventoryError, InventoryResult};
use crate::export;
use crate::ids::IdMinter;
use crate::import::{self, Row};
use crate::item_store::ItemStore;
use crate::models::InventoryItem;
use crate::persistence::{BlobStore, CATEGORIES_KEY, ITEMS_KEY};

pub struct Inventory<S: BlobStore> {
    items: ItemStore,
    categories: CategoryRegistry,
    minter: IdMinter,
    store: S,
    revision: u64,
}

/// Load and parse one blob; anything unreadable counts as absent
fn load_blob<T: DeserializeOwned>(store: &impl BlobStore, key: &str) -> Option<T> {
    match store.load(key) {
        Ok(Some(content)) => match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Failed to parse saved {}, starting fresh: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Failed to read saved {}, starting fresh: {}", key, e);
            None
        }
    }
}

fn persist<T: Serialize>(store: &mut impl BlobStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(InventoryError::from)
        .and_then(|json| store.save(key, &json));
    if let Err(e) = result {
        log::warn!("Failed to save {}: {}", key, e);
    }
}

impl<S: BlobStore> Inventory<S> {
    /// Load items and categories from `store`
    pub fn open(store: S) -> Self {
        let items: ItemStore = load_blob(&store, ITEMS_KEY).unwrap_or_default();
        let categories = load_blob::<Vec<String>>(&store, CATEGORIES_KEY)
            .map(CategoryRegistry::from_names)
            .unwrap_or_default();

        let duplicates = items.duplicate_ids();
        if !duplicates.is_empty() {
            log::warn!("Saved items contain duplicate ids: {:?}", duplicates);
        }

        log::info!(
            "Loaded {} items and {} categories",
            items.len(),
            categories.len()
        );
        let minter = IdMinter::seeded(items.ids());
        Self {
            items,
            categories,
            minter,
            store,
            revision: 0,
        }
    }

    fn items_changed(&mut self) {
        self.revision += 1;
        persist(&mut self.store, ITEMS_KEY, &self.items);
    }

    fn categories_changed(&mut self) {
        persist(&mut self.store, CATEGORIES_KEY, &self.categories);
    }

    /// Point the item at a live category: surrounding whitespace is dropped,
    /// blank becomes the sentinel and unknown names are registered
    fn adopt_category(&mut self, item: &mut InventoryItem) {
        let trimmed = item.category.trim();
        if trimmed.len() != item.category.len() {
            item.category = trimmed.to_string();
        }
        if item.category.is_empty() {
            item.category = SENTINEL_CATEGORY.to_string();
        } else if self.categories.add(&item.category) {
            log::info!("Registered new category {:?}", item.category);
            self.categories_changed();
        }
    }

    /// Create an item from a submitted draft and return its new id
    pub fn add_item(&mut self, draft: ItemDraft) -> String {
        let id = self.minter.mint();
        let mut item = draft.into_item(id.clone());
        self.adopt_category(&mut item);
        self.items.add(item);
        self.items_changed();
        id
    }

    /// Replace the item with the same id; silently ignored if there is none
    pub fn update_item(&mut self, mut item: InventoryItem) -> bool {
        if self.items.get(&item.id).is_none() {
            log::debug!("Update ignored, no item with id {}", item.id);
            return false;
        }
        self.adopt_category(&mut item);
        self.items.update(item);
        self.items_changed();
        true
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let deleted = self.items.delete(id);
        if deleted {
            self.items_changed();
        }
        deleted
    }

    pub fn add_category(&mut self, name: &str) -> bool {
        let added = self.categories.add(name);
        if added {
            self.categories_changed();
        }
        added
    }

    /// Remove a category and move its items to the sentinel in the same step
    pub fn remove_category(&mut self, name: &str) -> bool {
        if !self.categories.remove(name) {
            return false;
        }
        self.categories_changed();
        let moved = self.items.reassign_category(name, SENTINEL_CATEGORY);
        if moved > 0 {
            log::info!("Moved {} items from {:?} to {:?}", moved, name, SENTINEL_CATEGORY);
            self.items_changed();
        }
        true
    }

    /// Append one item per row as a single batch and return how many were added.
    /// Categories the registry does not know yet are registered.
    pub fn import_rows(&mut self, rows: &[Row]) -> usize {
        let items = import::normalize_rows(rows, &mut self.minter);
        let count = items.len();

        let mut new_categories = false;
        for item in &items {
            new_categories |= self.categories.add(&item.category);
        }
        if new_categories {
            self.categories_changed();
        }

        self.items.extend(items);
        if count > 0 {
            self.items_changed();
        }
        log::info!("Imported {} items", count);
        count
    }

    /// Read and import a CSV or Excel file; nothing is added on error
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> InventoryResult<usize> {
        let rows = import::read_rows(path)?;
        Ok(self.import_rows(&rows))
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> InventoryResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        export::write_csv(self.items.items(), file)?;
        log::info!(
            "Exported {} items to {}",
            self.items.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn export_xlsx<P: AsRef<Path>>(&self, path: P) -> InventoryResult<()> {
        export::write_xlsx(self.items.items(), path)
    }

    pub fn filtered<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        self.items.filtered(term)
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.get(id)
    }

    pub fn items(&self) -> &[InventoryItem] {
        self.items.items()
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Increases on every change to the item list
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
