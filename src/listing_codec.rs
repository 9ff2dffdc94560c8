//! Flattened text format for marketplace listings.
//!
//! A listing sequence is written as `Platform: $price (url); Platform: $price`.
//! The same text goes into the "Marketplace Listings" column of CSV/Excel exports
//! and of the remote workbook, and is parsed back on import.
//!
//! The format is lossy: a platform or price containing `:`, `$`, `(`, `)` or `;`
//! does not survive a round trip, and leading or trailing whitespace around any
//! field is trimmed away on decode. Decoding never fails; a malformed segment
//! becomes a listing with whatever fields could be recovered.

use crate::models::MarketplaceListing;

const SEPARATOR: &str = "; ";

/// Render a single listing as `Platform: $price` plus ` (url)` when a URL is set
pub fn encode_listing(listing: &MarketplaceListing) -> String {
    match listing.url() {
        Some(url) => format!("{}: ${} ({})", listing.platform, listing.listing_price, url),
        None => format!("{}: ${}", listing.platform, listing.listing_price),
    }
}

/// Join all listings into the flattened text form
pub fn encode(listings: &[MarketplaceListing]) -> String {
    listings
        .iter()
        .map(encode_listing)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Parse one `;`-separated segment
fn decode_segment(segment: &str) -> MarketplaceListing {
    let (platform_price, url) = match segment.split_once('(') {
        Some((head, tail)) => (head, Some(tail)),
        None => (segment, None),
    };

    let (platform, price) = match platform_price.split_once(':') {
        Some((platform, price)) => (platform, Some(price)),
        None => (platform_price, None),
    };

    let listing_price = price
        .map(|p| {
            let p = p.trim();
            p.strip_prefix('$').unwrap_or(p).trim().to_string()
        })
        .unwrap_or_default();

    let url = url.map(|u| {
        let u = u.trim();
        u.strip_suffix(')').unwrap_or(u).trim()
    });

    MarketplaceListing::new(platform.trim(), &listing_price, url)
}

/// Parse flattened listing text back into listings.
///
/// Blank input yields no listings. Every other segment yields exactly one
/// listing, even if its fields end up empty.
pub fn decode(text: &str) -> Vec<MarketplaceListing> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(';').map(decode_segment).collect()
}

#[cfg(test)]
#[path = "listing_codec_tests.rs"]
mod tests;
