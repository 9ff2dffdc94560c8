//! Turns loosely-typed table rows into well-formed inventory items.
//!
//! Rows come from CSV files or the first worksheet of an Excel workbook and
//! are keyed by whatever header text the file used. Each field is looked up
//! under its capitalized header first, then its lowercase one, and falls back
//! to a default when missing or empty. A row is never dropped: N rows in give
//! N items out, each with a freshly minted id.
//!
//! # Module Structure
//!
//! - [`reader`] - Decoding CSV and workbook files into [`Row`]s

pub mod reader;

use serde_json::Value;

use crate::categories::SENTINEL_CATEGORY;
use crate::ids::IdMinter;
use crate::listing_codec;
use crate::models::{Amount, InventoryItem};

pub use reader::{read_rows, read_rows_from, TableFormat};

/// One table row keyed by header cell
pub type Row = serde_json::Map<String, Value>;

pub const NAME_KEYS: &[&str] = &["Name", "name"];
pub const QUANTITY_KEYS: &[&str] = &["Quantity", "quantity"];
pub const CATEGORY_KEYS: &[&str] = &["Category", "category"];
pub const PRICE_KEYS: &[&str] = &["Cost Price", "Price", "price"];
pub const LISTINGS_COLUMN: &str = "Marketplace Listings";

/// Empty strings, zero, false and null count as "not provided"
fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First provided value among `keys`, in key order
fn lookup<'a>(row: &'a Row, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| is_provided(value))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => Amount::Number(n.as_f64().unwrap_or(0.0)).to_string(),
        other => other.to_string(),
    }
}

fn amount_of(value: &Value) -> Amount {
    match value {
        Value::Number(n) => Amount::Number(n.as_f64().unwrap_or(0.0)),
        other => Amount::Text(text_of(other)),
    }
}

/// Normalise a single row into an item with the given id
pub fn normalize_row(row: &Row, id: String) -> InventoryItem {
    let marketplaces = row
        .get(LISTINGS_COLUMN)
        .filter(|value| is_provided(value))
        .map(|value| listing_codec::decode(&text_of(value)))
        .unwrap_or_default();

    InventoryItem {
        id,
        name: lookup(row, NAME_KEYS).map(text_of).unwrap_or_default(),
        quantity: lookup(row, QUANTITY_KEYS).map(amount_of).unwrap_or_default(),
        category: lookup(row, CATEGORY_KEYS)
            .map(|value| text_of(value).trim().to_string())
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| SENTINEL_CATEGORY.to_string()),
        price: lookup(row, PRICE_KEYS).map(amount_of).unwrap_or_default(),
        marketplaces,
    }
}

/// Normalise every row, in input order, minting one id per row
pub fn normalize_rows(rows: &[Row], minter: &mut IdMinter) -> Vec<InventoryItem> {
    let items: Vec<InventoryItem> = rows
        .iter()
        .map(|row| normalize_row(row, minter.mint()))
        .collect();
    log::debug!("Normalised {} imported rows", items.len());
    items
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
