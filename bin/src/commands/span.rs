//! Span command implementation.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use datespan_core::{DateRange, parse_instant};
use serde_json::json;

/// Parse every input and print the tightest range covering them all.
pub(crate) fn span_inputs(inputs: &[String], tz: Tz, json_output: bool) -> Result<()> {
    let mut instants = Vec::with_capacity(inputs.len());
    for input in inputs {
        let (instant, _) = parse_instant(input.as_str(), tz)
            .with_context(|| format!("unable to parse {input:?}"))?;
        instants.push(instant);
    }

    let range = DateRange::spanning(&instants)?;

    if json_output {
        let (start_seconds, end_seconds) = range.unix_timestamps();
        let value = json!({
            "start": range.start.to_rfc3339(),
            "end": range.end.to_rfc3339(),
            "unix_seconds": [start_seconds, end_seconds],
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{range}");
    }
    Ok(())
}
