use std::fmt::Write;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use semver_shorthand::{SemverSpecifier, VersionSpecifier};

use crate::commands::{ExitStatus, OutputFormat};
use crate::printer::Printer;

#[derive(Serialize)]
struct Explanation<'a> {
    range: &'a str,
    canonical: String,
    comparators: &'a [VersionSpecifier],
}

/// Print the comparators a range compiles to.
pub(crate) fn explain(
    range: &str,
    format: OutputFormat,
    mut printer: Printer,
) -> Result<ExitStatus> {
    let specifier =
        SemverSpecifier::new(range).with_context(|| format!("Invalid range: `{range}`"))?;
    let comparators = specifier.selector().comparators();

    match format {
        OutputFormat::Text => {
            writeln!(printer, "{} {}", "canonical:".bold(), specifier.canonical())?;
            if comparators.is_empty() {
                writeln!(printer, "{} any version", "matches:".bold())?;
            }
            for comparator in comparators {
                writeln!(printer, "{} {comparator}", "requires:".bold())?;
            }
        }
        OutputFormat::Json => {
            let explanation = Explanation {
                range,
                canonical: specifier.canonical(),
                comparators,
            };
            writeln!(printer, "{}", serde_json::to_string_pretty(&explanation)?)?;
        }
    }

    Ok(ExitStatus::Success)
}
