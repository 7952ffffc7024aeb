use thiserror::Error;

use crate::version::InvalidVersionError;
use crate::version_specifier::VersionSpecifierParseError;

/// Any error this crate can return.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersionError),
}

/// A range string that can't be compiled into a selector, pointing at the offending clause.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct InvalidRangeError {
    // Boxed to keep `Result<VersionSelector, InvalidRangeError>` small.
    inner: Box<InvalidRangeErrorInner>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
struct InvalidRangeErrorInner {
    kind: RangeErrorKind,
    /// The whole range string.
    input: String,
    /// Byte offset of the start of the clause that failed.
    start: usize,
    /// Byte offset of the end of the clause that failed.
    end: usize,
}

impl InvalidRangeError {
    pub(crate) fn new(kind: RangeErrorKind, input: &str, start: usize, end: usize) -> Self {
        Self {
            inner: Box::new(InvalidRangeErrorInner {
                kind,
                input: input.to_string(),
                start,
                end,
            }),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &RangeErrorKind {
        &self.inner.kind
    }

    /// The range string that failed to parse.
    pub fn input(&self) -> &str {
        &self.inner.input
    }

    /// The clause of the range string that failed to parse.
    pub fn fragment(&self) -> &str {
        &self.inner.input[self.inner.start..self.inner.end]
    }
}

impl std::fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use unicode_width::UnicodeWidthStr;

        let InvalidRangeErrorInner {
            ref kind,
            ref input,
            start,
            end,
        } = *self.inner;
        writeln!(f, "Failed to parse version range: {kind}:")?;
        writeln!(f, "{input}")?;
        let indent = input[..start].width();
        // An empty clause still gets a marker.
        let point = input[start..end].width().max(1);
        writeln!(f, "{}{}", " ".repeat(indent), "^".repeat(point))?;
        Ok(())
    }
}

impl std::error::Error for InvalidRangeError {}

/// The reasons a single clause of a range string is rejected.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RangeErrorKind {
    #[error("Empty version range")]
    Empty,
    #[error("A wildcard matches every epoch and can't have an epoch prefix")]
    EpochOnWildcard,
    #[error("Nothing may follow a bare `*`, found `{0}`")]
    TrailingAfterWildcard(String),
    #[error("Placeholders (`x`, `X`, `*`) can't be combined with the `{operator}` operator")]
    PlaceholderWithOperator { operator: char },
    #[error("Nothing may follow a placeholder, found `{0}`")]
    PlaceholderRemainder(String),
    #[error("Only trailing release components can be placeholders, found `{0}`")]
    NonTrailingPlaceholder(String),
    #[error("A placeholder range can have at most 3 release components, found {0}")]
    TooManyComponents(usize),
    #[error("The epoch must be given before the operator, not in the version")]
    DuplicateEpoch,
    #[error("Couldn't parse `{0}` as an epoch")]
    InvalidEpoch(String),
    #[error("The upper bound of the range doesn't fit in a release component")]
    UpperBoundOverflow,
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersionError),
    #[error(transparent)]
    InvalidComparator(#[from] VersionSpecifierParseError),
}
