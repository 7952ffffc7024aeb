use std::process::ExitCode;

pub(crate) use canonical::canonical;
pub(crate) use check::check;
pub(crate) use explain::explain;

mod canonical;
mod check;
mod explain;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ExitStatus {
    /// The command succeeded.
    Success,

    /// At least one version lies outside the range.
    Failure,

    /// The command failed with an error, such as an invalid range.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

/// How results are written to stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One human-readable line per result.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}
