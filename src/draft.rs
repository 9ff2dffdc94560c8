use crate::models::{Amount, InventoryItem, MarketplaceListing};

/// Editable copy of an item, as held by an entry form before it is submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: Amount,
    pub category: String,
    pub price: Amount,
    pub marketplaces: Vec<MarketplaceListing>,
}

impl ItemDraft {
    /// Start editing an existing item; the id stays with the caller
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            category: item.category.clone(),
            price: item.price.clone(),
            marketplaces: item.marketplaces.clone(),
        }
    }

    /// Add a listing. Listings without a platform or a price are rejected.
    pub fn push_listing(&mut self, listing: MarketplaceListing) -> bool {
        if listing.platform.trim().is_empty() || listing.listing_price.trim().is_empty() {
            return false;
        }
        self.marketplaces.push(listing);
        true
    }

    pub fn remove_listing(&mut self, index: usize) -> Option<MarketplaceListing> {
        (index < self.marketplaces.len()).then(|| self.marketplaces.remove(index))
    }

    pub fn into_item(self, id: String) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            quantity: self.quantity,
            category: self.category,
            price: self.price,
            marketplaces: self.marketplaces,
        }
    }
}
