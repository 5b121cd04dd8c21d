//! Check command implementation.

use anyhow::{Result, bail};
use chrono_tz::Tz;
use datespan_core::DateRange;
use serde_json::json;

/// Validate each key and print the range it decodes to.
///
/// Exits non-zero when any key fails, so the command works as a filter
/// in scripts.
pub(crate) fn check_keys(keys: &[String], tz: Tz, json_output: bool) -> Result<()> {
    let mut results = Vec::new();
    let mut invalid = 0usize;

    for key in keys {
        match DateRange::from_key(key, tz) {
            Ok(range) => {
                if json_output {
                    results.push(json!({
                        "key": key,
                        "valid": true,
                        "start": range.start.to_rfc3339(),
                        "end": range.end.to_rfc3339(),
                    }));
                } else {
                    println!("{key} is valid: {range}");
                }
            }
            Err(err) => {
                invalid += 1;
                if json_output {
                    results.push(json!({
                        "key": key,
                        "valid": false,
                        "error": err.to_string(),
                    }));
                } else {
                    println!("{key} is not a valid date key: {err}");
                }
            }
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    if invalid > 0 {
        bail!("{invalid} of {} keys failed validation", keys.len());
    }
    Ok(())
}
