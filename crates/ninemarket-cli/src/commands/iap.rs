use ninemarket_core::format::{format_iap_price, format_iap_price_in};
use ninemarket_core::{AverageView, Money, ProductType};
use serde::Serialize;

use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct ProductRow {
    category: String,
    name: String,
    product_type: ProductType,
    price: String,
    catalog_price: String,
    buyable: bool,
}

#[derive(Debug, Serialize)]
struct IapData {
    token_price: Option<Money>,
    averages: Vec<AverageView>,
    rows: Vec<ProductRow>,
}

pub async fn run(runtime: &Runtime) -> Result<CommandResult, CliError> {
    let board = runtime.service().iap_board(runtime.context).await?;

    let rows: Vec<ProductRow> = board
        .categories
        .iter()
        .filter(|category| category.active)
        .flat_map(|category| {
            category
                .product_list
                .iter()
                .filter(|product| product.active)
                .map(move |product| ProductRow {
                    category: category.name.clone(),
                    name: product.name.clone(),
                    product_type: product.product_type,
                    price: format_iap_price_in(
                        product,
                        runtime.context.currency,
                        &runtime.converter,
                    ),
                    catalog_price: format_iap_price(product),
                    buyable: product.buyable,
                })
        })
        .collect();

    let empty = rows.is_empty();
    let data = serde_json::to_value(IapData {
        token_price: board.token_price,
        averages: board.averages,
        rows,
    })?;

    Ok(CommandResult::ok(data).warn_if(empty, "IAP catalog is empty"))
}
