//! Parse command implementation.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use datespan_core::parse_instant;
use serde_json::json;

/// Parse each input and print the resolved instant with its precision.
pub(crate) fn parse_inputs(inputs: &[String], tz: Tz, json_output: bool) -> Result<()> {
    let mut results = Vec::new();

    for input in inputs {
        let (instant, precision) = parse_instant(input.as_str(), tz)
            .with_context(|| format!("unable to parse {input:?}"))?;

        if json_output {
            results.push(json!({
                "input": input,
                "instant": instant.to_rfc3339(),
                "precision": precision,
                "unix_seconds": instant.timestamp(),
            }));
        } else {
            println!("{}  precision={}", instant.to_rfc3339(), precision);
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
