use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ItemProduct, ValidationError};

/// Orderings offered for market listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Cheapest per unit first.
    #[default]
    UnitPrice,
    /// Cheapest listing total first.
    Price,
    /// Biggest stack first.
    Quantity,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnitPrice => "unit-price",
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }

    /// Returns a sorted copy. Ties keep their incoming order.
    pub fn sort(self, products: &[ItemProduct]) -> Vec<ItemProduct> {
        let mut sorted = products.to_vec();
        match self {
            Self::UnitPrice => sorted.sort_by(|a, b| a.unit_price.total_cmp(&b.unit_price)),
            Self::Price => sorted.sort_by_key(|product| product.price),
            Self::Quantity => sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
        }
        sorted
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "unit-price" | "unitprice" => Ok(Self::UnitPrice),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            _ => Err(ValidationError::UnknownSortKey {
                value: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::listing;

    fn board() -> Vec<ItemProduct> {
        vec![
            listing(400000, 300, 10),
            listing(400000, 100, 2),
            listing(400000, 200, 40),
        ]
    }

    #[test]
    fn unit_price_ascending() {
        let sorted = SortKey::UnitPrice.sort(&board());
        let unit_prices: Vec<f64> = sorted.iter().map(|p| p.unit_price).collect();
        assert_eq!(unit_prices, vec![5.0, 30.0, 50.0]);
    }

    #[test]
    fn price_ascending() {
        let sorted = SortKey::Price.sort(&board());
        let prices: Vec<u64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn quantity_descending_and_input_untouched() {
        let input = board();
        let sorted = SortKey::Quantity.sort(&input);
        let quantities: Vec<u64> = sorted.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![40, 10, 2]);
        assert_eq!(input[0].quantity, 10);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("unit_price".parse::<SortKey>(), Ok(SortKey::UnitPrice));
        assert_eq!("Quantity".parse::<SortKey>(), Ok(SortKey::Quantity));
        assert!("newest".parse::<SortKey>().is_err());
    }
}
