use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use semver_shorthand::SemverSpecifier;

use crate::commands::{ExitStatus, OutputFormat};
use crate::printer::Printer;

#[derive(Serialize)]
struct CanonicalRange<'a> {
    range: &'a str,
    canonical: String,
}

/// Print the canonical form of each range.
pub(crate) fn canonical(
    ranges: &[String],
    format: OutputFormat,
    mut printer: Printer,
) -> Result<ExitStatus> {
    let canonical = ranges
        .iter()
        .map(|range| {
            let specifier =
                SemverSpecifier::new(range).with_context(|| format!("Invalid range: `{range}`"))?;
            Ok(CanonicalRange {
                range,
                canonical: specifier.canonical(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Text => {
            for range in &canonical {
                writeln!(printer, "{}", range.canonical)?;
            }
        }
        OutputFormat::Json => {
            writeln!(printer, "{}", serde_json::to_string_pretty(&canonical)?)?;
        }
    }

    Ok(ExitStatus::Success)
}
