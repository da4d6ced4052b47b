use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

/// Item sub types the marketplace can be browsed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSubType {
    Hourglass,
    ApStone,
    Scroll,
    Circle,
}

impl ItemSubType {
    pub const ALL: [Self; 4] = [Self::Hourglass, Self::ApStone, Self::Scroll, Self::Circle];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourglass => "HOURGLASS",
            Self::ApStone => "AP_STONE",
            Self::Scroll => "SCROLL",
            Self::Circle => "CIRCLE",
        }
    }

    /// Numeric code used in the market API path.
    pub const fn code(self) -> u32 {
        match self {
            Self::Hourglass => 15,
            Self::ApStone => 16,
            Self::Scroll => 21,
            Self::Circle => 22,
        }
    }
}

impl Display for ItemSubType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemSubType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|sub_type| sub_type.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownItemSubType {
                value: value.to_owned(),
            })
    }
}

/// One marketplace listing. Prices are in the game token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProduct {
    pub product_id: String,
    pub seller_agent_address: String,
    pub seller_avatar_address: String,
    pub price: u64,
    pub quantity: u64,
    pub registered_block_index: u64,
    pub exist: bool,
    pub legacy: bool,
    pub item_id: u32,
    pub icon_id: u32,
    pub grade: u32,
    pub item_type: u32,
    pub item_sub_type: u32,
    pub elemental_type: u32,
    pub tradable_id: String,
    pub set_id: u32,
    pub combat_point: u64,
    pub level: u32,
    pub option_count_from_combination: u32,
    pub unit_price: f64,
    pub crystal: u64,
    pub crystal_per_price: f64,
    pub by_custom_craft: bool,
    pub has_random_only_icon: bool,
}

impl ItemProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if Uuid::parse_str(&self.product_id).is_err() {
            return Err(ValidationError::InvalidProductId {
                value: self.product_id.clone(),
            });
        }
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        validate_non_negative("unitPrice", self.unit_price)?;
        validate_non_negative("crystalPerPrice", self.crystal_per_price)?;
        Ok(())
    }
}

/// One page of the market listings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketItemProductsResponse {
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub item_products: Vec<ItemProduct>,
    #[serde(default)]
    pub fungible_asset_value_products: Vec<serde_json::Value>,
}

impl MarketItemProductsResponse {
    pub fn empty(offset: u64, limit: u64) -> Self {
        Self {
            total_count: 0,
            limit,
            offset,
            item_products: Vec::new(),
            fungible_asset_value_products: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.item_products.iter().try_for_each(ItemProduct::validate)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn listing(item_id: u32, price: u64, quantity: u64) -> ItemProduct {
        ItemProduct {
            product_id: String::from("5f0b2f4e-8a55-4c61-9a8e-3d0d7f5ad9a1"),
            seller_agent_address: String::from("a1b2c3d4e5f60718293a4b5c6d7e8f9012345678"),
            seller_avatar_address: String::from("0f1e2d3c4b5a69788796a5b4c3d2e1f001234567"),
            price,
            quantity,
            registered_block_index: 1,
            exist: true,
            legacy: false,
            item_id,
            icon_id: item_id,
            grade: 1,
            item_type: 3,
            item_sub_type: 15,
            elemental_type: 0,
            tradable_id: String::from("tradable"),
            set_id: 0,
            combat_point: 0,
            level: 0,
            option_count_from_combination: 0,
            unit_price: price as f64 / quantity.max(1) as f64,
            crystal: 0,
            crystal_per_price: 0.0,
            by_custom_craft: false,
            has_random_only_icon: false,
        }
    }

    #[test]
    fn parses_sub_type_names_and_codes() {
        let parsed: ItemSubType = "ap-stone".parse().expect("parses");
        assert_eq!(parsed, ItemSubType::ApStone);
        assert_eq!(parsed.code(), 16);
        assert_eq!(ItemSubType::Circle.code(), 22);
        assert!("SWORD".parse::<ItemSubType>().is_err());
    }

    #[test]
    fn rejects_zero_quantity_and_bad_ids() {
        let mut product = listing(400000, 100, 0);
        assert_eq!(product.validate(), Err(ValidationError::ZeroQuantity));

        product.quantity = 1;
        product.product_id = String::from("not-a-uuid");
        assert!(matches!(
            product.validate(),
            Err(ValidationError::InvalidProductId { .. })
        ));
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let body = serde_json::json!({
            "totalCount": 1,
            "limit": 10,
            "offset": 0,
            "itemProducts": [serde_json::to_value(listing(400000, 90, 3)).expect("serializes")],
            "fungibleAssetValueProducts": []
        });

        let response: MarketItemProductsResponse =
            serde_json::from_value(body).expect("deserializes");
        assert_eq!(response.item_products.len(), 1);
        assert_eq!(response.item_products[0].unit_price, 30.0);
        assert!(response.validate().is_ok());
    }
}
