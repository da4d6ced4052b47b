use ninemarket_core::format::format_money;
use ninemarket_core::{EnvelopeError, Money};
use serde::Serialize;

use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct PriceRow {
    source: &'static str,
    price: Option<String>,
}

#[derive(Debug, Serialize)]
struct PriceData {
    token: String,
    price: Option<Money>,
    sheet_price_krw: Option<f64>,
    rows: Vec<PriceRow>,
}

pub async fn run(runtime: &Runtime) -> Result<CommandResult, CliError> {
    let service = runtime.service();
    let (price, sheet_price_krw) = tokio::join!(
        service.token_price(runtime.context.currency),
        service.sheet_token_price(runtime.context.network),
    );

    let rows = vec![
        PriceRow {
            source: "coin price",
            price: price.as_ref().map(format_money),
        },
        PriceRow {
            source: "price sheet",
            price: sheet_price_krw.map(|krw| format!("{krw:.2} KRW")),
        },
    ];
    let data = serde_json::to_value(PriceData {
        token: runtime.config.api.token_symbol.to_ascii_uppercase(),
        price,
        sheet_price_krw,
        rows,
    })?;

    let result = CommandResult::ok(data);
    match price {
        Some(_) => Ok(result),
        None => Ok(result.with_error(EnvelopeError::new(
            "price.unavailable",
            "token price could not be fetched; see logs for the upstream error",
        )?)),
    }
}
