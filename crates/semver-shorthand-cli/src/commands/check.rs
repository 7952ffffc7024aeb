use std::fmt::Write;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use semver_shorthand::{SemverSpecifier, Version};

use crate::commands::{ExitStatus, OutputFormat};
use crate::printer::Printer;

#[derive(Serialize)]
struct CheckReport<'a> {
    range: &'a str,
    canonical: String,
    results: Vec<CheckResult<'a>>,
}

#[derive(Serialize)]
struct CheckResult<'a> {
    version: &'a str,
    contained: bool,
}

/// Check whether each version lies in the range.
pub(crate) fn check(
    range: &str,
    versions: &[String],
    format: OutputFormat,
    mut printer: Printer,
) -> Result<ExitStatus> {
    let specifier =
        SemverSpecifier::new(range).with_context(|| format!("Invalid range: `{range}`"))?;
    debug!("Checking against `{}`", specifier.canonical());

    // Parse everything up front so that an invalid version doesn't leave partial output.
    let parsed = versions
        .iter()
        .map(|version| {
            version
                .parse::<Version>()
                .with_context(|| format!("Invalid version: `{version}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    let results: Vec<CheckResult> = versions
        .iter()
        .zip(&parsed)
        .map(|(given, version)| CheckResult {
            version: given,
            contained: specifier.contains_version(version),
        })
        .collect();
    let status = exit_status(&results);

    match format {
        OutputFormat::Text => {
            for result in &results {
                if result.contained {
                    writeln!(
                        printer,
                        "{} `{}` satisfies `{}`",
                        "✓".green(),
                        result.version,
                        specifier.as_str().trim()
                    )?;
                } else {
                    writeln!(
                        printer,
                        "{} `{}` does not satisfy `{}`",
                        "✗".red(),
                        result.version,
                        specifier.as_str().trim()
                    )?;
                }
            }
        }
        OutputFormat::Json => {
            let report = CheckReport {
                range,
                canonical: specifier.canonical(),
                results,
            };
            writeln!(printer, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(status)
}

fn exit_status(results: &[CheckResult]) -> ExitStatus {
    if results.iter().all(|result| result.contained) {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    }
}
