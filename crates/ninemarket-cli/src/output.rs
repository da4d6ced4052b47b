use ninemarket_core::Envelope;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(envelope: &Envelope<Value>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }
    Ok(())
}

/// Header lines from `meta`, then `data.rows` as aligned columns when present,
/// otherwise `data` as indented JSON.
pub fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    out.push_str(&format!(
        "view        : {} / {}\n",
        envelope.meta.network, envelope.meta.currency
    ));
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    match envelope.data.get("rows").and_then(Value::as_array) {
        Some(rows) => out.push_str(&columns(rows)),
        None => {
            out.push_str("data:\n");
            for line in serde_json::to_string_pretty(&envelope.data)?.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    if !envelope.errors.is_empty() {
        out.push_str("errors:\n");
        for error in &envelope.errors {
            out.push_str(&format!("  - {}: {}\n", error.code, error.message));
        }
    }
    Ok(out)
}

fn columns(rows: &[Value]) -> String {
    let Some(header) = rows.first().and_then(Value::as_object) else {
        return String::from("(no rows)\n");
    };
    let keys: Vec<&String> = header.keys().collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .filter_map(Value::as_object)
        .map(|row| keys.iter().map(|key| cell(row, key)).collect())
        .collect();

    let widths: Vec<usize> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(key.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    out.push_str(&line(keys.iter().map(|key| key.as_str()).collect()));
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

fn cell(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => String::from("-"),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
