use anstream::print;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Printer {
    /// A printer that prints results to stdout.
    Default,
    /// A printer that suppresses all output, leaving only the exit code.
    Quiet,
    /// A printer that prints results to stdout, with debug logs going to stderr.
    Verbose,
}

impl std::fmt::Write for Printer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        match self {
            Self::Default | Self::Verbose => {
                #[allow(clippy::print_stdout)]
                {
                    print!("{s}");
                }
            }
            Self::Quiet => {}
        }

        Ok(())
    }
}
