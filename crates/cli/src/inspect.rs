//! `satcat parse-line` and `satcat coerce`: look at single records without a run.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use satcat_engine::fixed_width::CATALOG_LAYOUT;
use satcat_engine::{coerce, coerce_cell, parse_catalog_line, Value};

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))
}

/// Field name to coerced value, in layout order.
fn parse_line_fields(line: &str) -> Map<String, JsonValue> {
    let raw = parse_catalog_line(line);
    CATALOG_LAYOUT
        .iter()
        .zip(raw.cells())
        .map(|(span, cell)| {
            let value = serde_json::to_value(coerce_cell(cell)).unwrap_or(JsonValue::Null);
            (span.name.to_string(), value)
        })
        .collect()
}

pub fn cmd_parse_line(line: &str) -> Result<(), CliError> {
    let fields = parse_line_fields(line.trim_end_matches(&['\r', '\n'][..]));
    println!("{}", to_json(&fields)?);
    Ok(())
}

#[derive(Serialize)]
struct Coerced<'a> {
    input: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    value: Value,
}

pub fn cmd_coerce(values: &[String], json: bool) -> Result<(), CliError> {
    let coerced: Vec<Coerced<'_>> = values
        .iter()
        .map(|input| {
            let value = coerce(input);
            Coerced {
                input,
                kind: value.type_name(),
                value,
            }
        })
        .collect();

    if json {
        println!("{}", to_json(&coerced)?);
    } else {
        for c in &coerced {
            println!("{}\t{}", c.kind, c.value);
        }
    }
    Ok(())
}
