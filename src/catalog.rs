//! Static catalog of marketplace platforms offered when adding a listing.
//!
//! Listings are not validated against it; the codec accepts any platform name.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplacePlatform {
    pub id: &'static str,
    pub name: &'static str,
    /// URL prefix a listing link is expected to contain; `*` is a wildcard
    pub url_pattern: Option<&'static str>,
    /// Brand colour for display
    pub color: &'static str,
}

pub const MARKETPLACE_PLATFORMS: &[MarketplacePlatform] = &[
    MarketplacePlatform {
        id: "amazon",
        name: "Amazon",
        url_pattern: Some("https://www.amazon.com/"),
        color: "#FF9900",
    },
    MarketplacePlatform {
        id: "ebay",
        name: "eBay",
        url_pattern: Some("https://www.ebay.com/"),
        color: "#E53238",
    },
    MarketplacePlatform {
        id: "etsy",
        name: "Etsy",
        url_pattern: Some("https://www.etsy.com/"),
        color: "#F1641E",
    },
    MarketplacePlatform {
        id: "facebook",
        name: "Facebook Marketplace",
        url_pattern: Some("https://www.facebook.com/marketplace/"),
        color: "#1877F2",
    },
    MarketplacePlatform {
        id: "shopify",
        name: "Shopify",
        url_pattern: Some("https://*.myshopify.com/"),
        color: "#96BF48",
    },
    MarketplacePlatform {
        id: "walmart",
        name: "Walmart",
        url_pattern: Some("https://www.walmart.com/"),
        color: "#0071CE",
    },
    MarketplacePlatform {
        id: "other",
        name: "Other",
        url_pattern: None,
        color: "#6B7280",
    },
];

pub fn by_id(id: &str) -> Option<&'static MarketplacePlatform> {
    MARKETPLACE_PLATFORMS.iter().find(|p| p.id == id)
}

/// Look up a platform by display name, ignoring case
pub fn by_name(name: &str) -> Option<&'static MarketplacePlatform> {
    MARKETPLACE_PLATFORMS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Loose link check: unknown platforms and platforms without a pattern accept
/// any URL, otherwise the URL must contain the pattern, with `*` matching any run
/// of characters.
pub fn is_valid_url(platform_id: &str, url: &str) -> bool {
    match by_id(platform_id).and_then(|p| p.url_pattern) {
        Some(pattern) => contains_pattern(url, pattern),
        None => true,
    }
}

fn contains_pattern(haystack: &str, pattern: &str) -> bool {
    let mut rest = haystack;
    for part in pattern.split('*') {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    true
}
