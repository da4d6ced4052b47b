use ninemarket_core::format::{format_money, item_display_name};
use ninemarket_core::{token_equivalent, AveragePrice, Money};
use serde::Serialize;

use crate::cli::AveragesArgs;
use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct AverageRow {
    item: String,
    bundle: u64,
    unit_price: String,
    tokens: Option<String>,
}

#[derive(Debug, Serialize)]
struct AveragesData {
    token_price: Option<Money>,
    averages: Vec<AveragePrice>,
    rows: Vec<AverageRow>,
}

pub async fn run(args: &AveragesArgs, runtime: &Runtime) -> Result<CommandResult, CliError> {
    let mut service = runtime.service();
    if !args.items.is_empty() {
        service = service.with_tracked_items(args.items.clone());
    }

    let (averages, token_price) = tokio::join!(
        service.averages(runtime.context),
        service.token_price(runtime.context.currency),
    );
    let averages = averages?;

    let rows = averages
        .iter()
        .map(|average| AverageRow {
            item: item_display_name(average.sheet_id)
                .map(String::from)
                .unwrap_or_else(|| average.sheet_id.to_string()),
            bundle: average.amount,
            unit_price: format_money(&average.average_price),
            tokens: token_equivalent(&average.average_price, token_price.as_ref())
                .map(|tokens| format!("{tokens:.2} NCG")),
        })
        .collect();

    let empty = averages.is_empty();
    let data = serde_json::to_value(AveragesData {
        token_price,
        averages,
        rows,
    })?;

    Ok(CommandResult::ok(data)
        .warn_if(empty, "no eligible IAP products for the tracked items")
        .warn_if(token_price.is_none(), "token price unavailable"))
}
