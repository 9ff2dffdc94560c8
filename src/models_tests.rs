use super::*;

#[test]
fn amount_displays_whole_numbers_without_fraction() {
    assert_eq!(Amount::Number(5.0).to_string(), "5");
    assert_eq!(Amount::Number(9.99).to_string(), "9.99");
    assert_eq!(Amount::from("12.50").to_string(), "12.50");
}

#[test]
fn amount_as_f64_is_lenient() {
    assert_eq!(Amount::from(" 3.5 ").as_f64(), 3.5);
    assert_eq!(Amount::from("n/a").as_f64(), 0.0);
    assert_eq!(Amount::Number(2.0).as_f64(), 2.0);
}

#[test]
fn amount_json_keeps_numbers_and_strings_apart() {
    let json = serde_json::to_string(&vec![Amount::Number(5.0), Amount::Number(1.25), Amount::from("7")])
        .unwrap();
    assert_eq!(json, r#"[5,1.25,"7"]"#);

    let back: Vec<Amount> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![Amount::Number(5.0), Amount::Number(1.25), Amount::from("7")]);
}

#[test]
fn amount_blankness() {
    assert!(Amount::default().is_blank());
    assert!(Amount::from("  ").is_blank());
    assert!(!Amount::from("0").is_blank());
}

#[test]
fn listing_new_drops_empty_url() {
    let listing = MarketplaceListing::new("Etsy", "4", Some(""));
    assert_eq!(listing.url, None);
    assert_eq!(listing.url(), None);
}

#[test]
fn item_json_uses_camel_case_listing_fields() {
    let item = InventoryItem {
        id: "1".to_string(),
        name: "Widget".to_string(),
        quantity: Amount::Number(5.0),
        category: "Electronics".to_string(),
        price: Amount::Number(9.99),
        marketplaces: vec![MarketplaceListing::new("Amazon", "12.50", Some("http://a"))],
    };
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["marketplaces"][0]["listingPrice"], "12.50");
    assert_eq!(json["marketplaces"][0]["url"], "http://a");
}

#[test]
fn item_without_marketplaces_key_deserializes() {
    let item: InventoryItem = serde_json::from_str(
        r#"{"id":"x","name":"Lamp","quantity":"2","category":"Other","price":0}"#,
    )
    .unwrap();
    assert!(item.marketplaces.is_empty());
    assert_eq!(item.quantity, Amount::from("2"));
}
