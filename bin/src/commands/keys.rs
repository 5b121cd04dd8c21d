//! Keys command implementation.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use datespan_core::{DateRange, Granularity};

/// Print the bucket keys between two date inputs, one per line.
pub(crate) fn list_keys(
    from: &str,
    to: &str,
    granularity: &str,
    tz: Tz,
    json_output: bool,
) -> Result<()> {
    let granularity: Granularity = granularity.parse()?;
    let range = DateRange::parse(from, to, tz)
        .with_context(|| format!("unable to build range from {from:?} to {to:?}"))?;
    let keys = range.keys(granularity);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in &keys {
            println!("{key}");
        }
    }
    Ok(())
}
