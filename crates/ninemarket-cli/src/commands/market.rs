use ninemarket_core::format::{
    explorer_url, format_comparison, format_listing_price, short_address,
};
use ninemarket_core::{ItemSubType, ListingView, MarketBoard, SortKey};
use serde::Serialize;

use crate::cli::MarketArgs;
use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct ListingRow {
    item: String,
    quantity: u64,
    unit_price: String,
    price: String,
    vs_iap: Option<String>,
    seller: String,
    explorer: String,
}

#[derive(Debug, Serialize)]
struct MarketData {
    board: MarketBoard,
    rows: Vec<ListingRow>,
}

pub async fn run(args: &MarketArgs, runtime: &Runtime) -> Result<CommandResult, CliError> {
    let sub_type: ItemSubType = args.sub_type.parse()?;
    let sort: SortKey = args.sort.parse()?;
    let limit = args.limit.unwrap_or(runtime.config.market.page_size);
    runtime.config.market_api()?;

    let board = runtime
        .service()
        .market_board(runtime.context, sub_type, sort, limit)
        .await?;

    let rows = board.listings.iter().map(|view| row(view, &board)).collect();
    let empty = board.listings.is_empty();
    let unpriced = board.token_price.is_none();
    let data = serde_json::to_value(MarketData { board, rows })?;

    Ok(CommandResult::ok(data)
        .warn_if(empty, "no listings returned")
        .warn_if(unpriced, "token price unavailable; fiat prices omitted"))
}

fn row(view: &ListingView, board: &MarketBoard) -> ListingRow {
    let listing = &view.listing;
    let priced = |amount: f64| match &board.token_price {
        Some(token_price) => format_listing_price(amount, token_price),
        None => format!("{amount} NCG"),
    };

    ListingRow {
        item: view
            .item_name
            .map(String::from)
            .unwrap_or_else(|| listing.item_id.to_string()),
        quantity: listing.quantity,
        unit_price: priced(listing.unit_price),
        price: priced(listing.price as f64),
        vs_iap: view.comparison.as_ref().map(format_comparison),
        seller: short_address(&listing.seller_agent_address),
        explorer: explorer_url(board.context.network, &listing.seller_agent_address),
    }
}
