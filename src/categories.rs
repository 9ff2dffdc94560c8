//! Ordered category list with a fixed "Other" fallback.
//!
//! The sentinel is present exactly once and always last. Removing a category
//! does not touch items; the caller reassigns them (see
//! [`ItemStore::reassign_category`](crate::item_store::ItemStore::reassign_category)).

use serde::Serialize;

/// The always-present, always-last fallback category
pub const SENTINEL_CATEGORY: &str = "Other";

const DEFAULT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Books",
    "Home & Garden",
    "Toys",
    "Sports Equipment",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from_names(DEFAULT_CATEGORIES.iter().copied())
    }
}

impl CategoryRegistry {
    /// Registry holding only the sentinel
    pub fn empty() -> Self {
        Self {
            names: vec![SENTINEL_CATEGORY.to_string()],
        }
    }

    /// Build a registry from a saved list. Empty names and duplicates are
    /// dropped and every sentinel occurrence is moved to a single final slot.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::empty();
        for name in names {
            registry.add(name.as_ref());
        }
        registry
    }

    /// Append `name` just before the sentinel. Returns false (and changes
    /// nothing) for an empty name, the sentinel itself or a duplicate.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() || name == SENTINEL_CATEGORY || self.contains(name) {
            return false;
        }
        let before_sentinel = self.names.len() - 1;
        self.names.insert(before_sentinel, name.to_string());
        true
    }

    /// Remove `name`. The sentinel can never be removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == SENTINEL_CATEGORY {
            return false;
        }
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true: the sentinel is always present
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sentinel present exactly once, in the final position
    pub fn invariant_holds(&self) -> bool {
        self.names.last().map(String::as_str) == Some(SENTINEL_CATEGORY)
            && self.names.iter().filter(|n| *n == SENTINEL_CATEGORY).count() == 1
    }
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
