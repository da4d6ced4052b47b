use std::time::{Duration, Instant};

use ninemarket_core::format::format_money;
use ninemarket_core::Money;
use serde::Serialize;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;

use crate::cli::{Cli, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::{envelope, CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct TickData {
    tick: u64,
    price: Option<Money>,
    formatted: Option<String>,
}

#[derive(Debug, Serialize)]
struct WatchSummary {
    ticks: u64,
    last_price: Option<Money>,
}

fn refresh_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Prints one envelope per refresh and returns a summary once `--ticks` is
/// reached. Without `--ticks` it runs until interrupted.
///
/// Each fetch finishes before the next tick is awaited, so refreshes never
/// overlap. A fetch that outlasts the interval pushes the schedule back
/// instead of triggering catch-up ticks.
pub async fn run(args: &WatchArgs, runtime: &Runtime, cli: &Cli) -> Result<CommandResult, CliError> {
    let service = runtime.service();
    let period = runtime.config.refresh.token_price_interval();
    let mut interval = refresh_interval(period);
    let mut last_price = None;
    let mut ticks = 0;

    while args.ticks.map_or(true, |limit| ticks < limit) {
        interval.tick().await;
        let started = Instant::now();
        ticks += 1;

        let price = service.refresh_token_price(runtime.context.currency).await;
        if let Some(price) = price {
            info!(tick = ticks, price = price.decimal, currency = %price.ticker(), "token price refreshed");
            last_price = Some(price);
        }

        let tick = CommandResult::ok(serde_json::to_value(TickData {
            tick: ticks,
            price,
            formatted: price.as_ref().map(format_money),
        })?)
        .warn_if(price.is_none(), "token price unavailable");

        let tick_envelope = envelope(runtime.context, tick, started)?;
        output::render(&tick_envelope, cli.format, cli.pretty)?;
        crate::check_strict(cli, &tick_envelope)?;
    }

    Ok(CommandResult::ok(serde_json::to_value(WatchSummary {
        ticks,
        last_price,
    })?))
}
