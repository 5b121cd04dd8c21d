//! Interval command implementation.

use anyhow::{Context, Result};
use datespan_core::Interval;
use serde_json::json;

/// Parse a resolution string and print its parts and duration.
pub(crate) fn show_interval(resolution: &str, json_output: bool) -> Result<()> {
    let interval: Interval = resolution
        .parse()
        .with_context(|| format!("unable to parse interval {resolution:?}"))?;
    let seconds = interval.duration().num_seconds();

    if json_output {
        let value = json!({
            "amount": interval.amount,
            "unit": interval.unit,
            "seconds": seconds,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Interval: {interval}");
        println!("Unit:     {}", interval.unit);
        println!("Amount:   {}", interval.amount);
        println!("Duration: {seconds}s");
    }
    Ok(())
}
