use ninemarket_core::format::format_money;
use ninemarket_core::{Money, ValidationError};
use serde::Serialize;

use crate::cli::ConvertArgs;
use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct ConversionRow {
    currency: String,
    rate: f64,
    amount: Money,
    formatted: String,
}

#[derive(Debug, Serialize)]
struct ConvertData {
    input: Money,
    rows: Vec<ConversionRow>,
}

pub fn run(args: &ConvertArgs, runtime: &Runtime) -> Result<CommandResult, CliError> {
    if !args.amount.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "amount" }.into());
    }

    let converter = &runtime.converter;
    let input = Money::new(args.amount, converter.base());

    let converted = if args.all {
        converter
            .supported_currencies()
            .into_iter()
            .map(|ticker| converter.convert(&input, ticker))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        match &args.to {
            Some(code) => vec![converter.convert_code(&input, code)?],
            None => vec![converter.convert(&input, runtime.context.currency)?],
        }
    };

    let rows = converted
        .into_iter()
        .map(|amount| {
            Ok(ConversionRow {
                currency: amount.ticker().to_string(),
                rate: converter.rate(amount.ticker())?,
                formatted: format_money(&amount),
                amount,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let data = serde_json::to_value(ConvertData { input, rows })?;
    Ok(CommandResult::ok(data).warn_if(
        args.amount < 0.0,
        "negative amounts convert but are not valid prices",
    ))
}
