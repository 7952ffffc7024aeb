use std::process::ExitCode;

use anstream::eprintln;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;

use crate::commands::{ExitStatus, OutputFormat};

mod commands;
mod logging;
mod printer;

#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not print any output, only set the exit code.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Log how ranges are compiled to stderr.
    #[arg(global = true, long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// The format of the results on stdout.
    #[arg(
        global = true,
        long,
        value_enum,
        default_value_t = OutputFormat::default(),
        env = "SEMVER_SHORTHAND_OUTPUT_FORMAT"
    )]
    output_format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether versions lie in a range; exits with 1 if any doesn't.
    Check(CheckArgs),
    /// Print the canonical form of ranges.
    Canonical(CanonicalArgs),
    /// Print the comparators a range compiles to.
    Explain(ExplainArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// A range such as `^1.2.3`, `1.x` or `~1.0, !=1.0.7`.
    range: String,

    /// The versions to check.
    #[arg(required = true)]
    versions: Vec<String>,
}

#[derive(Args)]
struct CanonicalArgs {
    /// The ranges to normalize.
    #[arg(required = true)]
    ranges: Vec<String>,
}

#[derive(Args)]
struct ExplainArgs {
    /// The range to explain.
    range: String,
}

fn inner() -> Result<ExitStatus> {
    let cli = Cli::parse();

    logging::setup_logging(if cli.verbose {
        logging::Level::Verbose
    } else {
        logging::Level::Default
    })?;

    let printer = if cli.quiet {
        printer::Printer::Quiet
    } else if cli.verbose {
        printer::Printer::Verbose
    } else {
        printer::Printer::Default
    };

    match cli.command {
        Commands::Check(args) => {
            commands::check(&args.range, &args.versions, cli.output_format, printer)
        }
        Commands::Canonical(args) => commands::canonical(&args.ranges, cli.output_format, printer),
        Commands::Explain(args) => commands::explain(&args.range, cli.output_format, printer),
    }
}

fn main() -> ExitCode {
    match inner() {
        Ok(code) => code.into(),
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                let mut causes = err.chain();
                if let Some(error) = causes.next() {
                    eprintln!("{}: {}", "error".red().bold(), error.to_string().trim());
                }
                for err in causes {
                    eprintln!("  {}: {}", "Caused by".red().bold(), err.to_string().trim());
                }
            }
            ExitStatus::Error.into()
        }
    }
}
