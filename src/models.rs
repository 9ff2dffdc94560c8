use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A quantity or price as entered: either a number or the text typed into a form
/// or read from a spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Parse the amount as f64, returning 0.0 if parsing fails
    pub fn as_f64(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    /// Returns true for an empty text value or a zero number
    pub fn is_blank(&self) -> bool {
        match self {
            Amount::Number(n) => *n == 0.0,
            Amount::Text(s) => s.trim().is_empty(),
        }
    }

    /// Whole numbers are written without a fractional part ("5", not "5.0")
    fn integral(n: f64) -> Option<i64> {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
            Some(n as i64)
        } else {
            None
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Amount::Text(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => match Self::integral(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Number(n) => match Self::integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Amount::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Amount::Number(n),
            Repr::Text(s) => Amount::Text(s),
        })
    }
}

/// A single posting of an item on a marketplace
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub platform: String,
    pub listing_price: String,
    /// `None` and an empty string both mean "no URL"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl MarketplaceListing {
    pub fn new(platform: &str, listing_price: &str, url: Option<&str>) -> Self {
        Self {
            platform: platform.to_string(),
            listing_price: listing_price.to_string(),
            url: url.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }

    /// The URL if one is set and non-empty
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: Amount,
    pub category: String,
    pub price: Amount,
    #[serde(default)]
    pub marketplaces: Vec<MarketplaceListing>,
}

impl InventoryItem {
    /// Case-insensitive match of `term` against name or category.
    /// `term` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.category.to_lowercase().contains(term)
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
