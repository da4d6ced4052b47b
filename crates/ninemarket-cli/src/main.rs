mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use ninemarket_core::AppConfig;

use crate::cli::Cli;
use crate::commands::Runtime;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = AppConfig::discover(cli.config.as_deref())?;
    logging::init(&config.logging);
    let runtime = Runtime::new(&cli, config)?;

    let envelope = commands::run(&cli, &runtime).await?;
    output::render(&envelope, cli.format, cli.pretty)?;
    check_strict(&cli, &envelope)
}

pub(crate) fn check_strict<T>(
    cli: &Cli,
    envelope: &ninemarket_core::Envelope<T>,
) -> Result<(), CliError> {
    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }
    Ok(())
}
