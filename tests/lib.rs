//! Shared fixtures for the ninemarket behavior tests.

use ninemarket_core::IapProduct;
use serde_json::{json, Value};

/// Active, buyable IAP product bundling `rewards` as `(sheet_item_id, amount)`.
/// `usd` becomes the network price, with KRW derived at 1350 per USD.
pub fn iap_product(name: &str, rewards: &[(u32, u64)], usd: Option<f64>) -> IapProduct {
    let rewards: Vec<Value> = rewards
        .iter()
        .map(|(sheet_item_id, amount)| {
            json!({
                "sheet_item_id": sheet_item_id,
                "fungible_item_id": format!("fungible-{sheet_item_id}"),
                "amount": amount,
            })
        })
        .collect();
    let network_price = usd.map(|usd| json!({ "KRW": usd * 1350.0, "USD": usd }));

    serde_json::from_value(json!({
        "name": name,
        "order": 1,
        "product_type": "IAP",
        "active": true,
        "buyable": true,
        "fungible_item_list": rewards,
        "network_price": network_price,
    }))
    .expect("product fixture deserializes")
}

/// One market listing as the market API returns it.
pub fn listing_json(item_id: u32, price: u64, quantity: u64) -> Value {
    json!({
        "productId": "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d",
        "sellerAgentAddress": "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678",
        "sellerAvatarAddress": "0f1e2d3c4b5a69788796a5b4c3d2e1f001234567",
        "price": price,
        "quantity": quantity,
        "registeredBlockIndex": 10,
        "exist": true,
        "legacy": false,
        "itemId": item_id,
        "iconId": item_id,
        "grade": 1,
        "itemType": 3,
        "itemSubType": 15,
        "elementalType": 0,
        "tradableId": "tradable",
        "setId": 0,
        "combatPoint": 0,
        "level": 0,
        "optionCountFromCombination": 0,
        "unitPrice": price as f64 / quantity as f64,
        "crystal": 0,
        "crystalPerPrice": 0.0,
        "byCustomCraft": false,
        "hasRandomOnlyIcon": false,
    })
}

/// A single page of listings.
pub fn listings_body(listings: &[Value]) -> String {
    json!({
        "totalCount": listings.len(),
        "limit": 50,
        "offset": 0,
        "itemProducts": listings,
        "fungibleAssetValueProducts": [],
    })
    .to_string()
}
