//! Compiles NPM-flavored shorthand ranges into PEP 440 comparators.
//!
//! | Range      | Comparators              |
//! |------------|--------------------------|
//! | `*`, `x`   | (none)                   |
//! | `1`, `1.x` | `>=1.0.0, <2.0.0`        |
//! | `1.2.x`    | `>=1.2.0, <1.3.0`        |
//! | `^0.2.3`   | `>=0.2.3, <0.3.0`        |
//! | `~1.2.3`   | `>=1.2.3, <1.3.0`        |
//! | `1.2.3`    | `==1.2.3`                |
//! | `2!^1.0`   | `>=2!1.0.0, <2!2.0.0`    |
//! | `>=1.0`    | `>=1.0` (PEP 440 as-is)  |

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use unscanny::Scanner;

use crate::error::{InvalidRangeError, RangeErrorKind};
use crate::version::InvalidVersionError;
use crate::{Version, VersionSelector, VersionSpecifier};

/// A dotted release where every component is a number or a placeholder, followed by anything.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<release>(?:[0-9]+|[xX*])(?:\.(?:[0-9]+|[xX*]))*)(?P<rest>.*)$")
        .expect("the placeholder grammar is a valid regex")
});

/// The maximum number of release components in a placeholder range, `major.minor.patch`.
const MAX_PLACEHOLDER_COMPONENTS: usize = 3;

/// The prefix operators of the shorthand syntax.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Shorthand {
    /// `^`, compatible up to the leftmost non-zero component.
    Caret,
    /// `~`, compatible up to the minor version.
    Tilde,
}

impl Shorthand {
    fn as_char(self) -> char {
        match self {
            Self::Caret => '^',
            Self::Tilde => '~',
        }
    }
}

/// A single clause of a range, before compilation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum RangeToken {
    /// `*`, `x`, `x.x.x`
    Wildcard,
    /// A bare version with at least three release components, `1.0.4`.
    Explicit(Version),
    /// `1`, `1.0`, `1.x`, `1.2.x`
    Prefix(Version),
    /// `^1.0.4`
    Caret(Version),
    /// `~1.0.4`
    Tilde(Version),
    /// A PEP 440 comparator that is passed through, `>=1.0`.
    Comparator(VersionSpecifier),
}

/// Parse a comma separated list of shorthand ranges and PEP 440 comparators into a selector
/// that requires all of them.
///
/// ```rust
/// use semver_shorthand::parse_range;
///
/// let selector = parse_range("1.x, !=1.4.0").unwrap();
/// assert_eq!(selector.to_string(), ">=1.0.0, !=1.4.0, <2.0.0");
/// ```
pub fn parse(input: &str) -> Result<VersionSelector, InvalidRangeError> {
    let mut comparators = Vec::new();
    let mut start = 0;
    for clause in input.split(',') {
        let trimmed = clause.trim();
        let clause_start = start + (clause.len() - clause.trim_start().len());
        let clause_end = clause_start + trimmed.len();

        let compiled = tokenize(trimmed)
            .and_then(compile)
            .map_err(|kind| InvalidRangeError::new(kind, input, clause_start, clause_end))?;
        comparators.extend(compiled);

        start += clause.len() + ','.len_utf8();
    }
    Ok(VersionSelector::from_unsorted(comparators))
}

/// Turn a single trimmed clause into a [`RangeToken`].
pub(crate) fn tokenize(clause: &str) -> Result<RangeToken, RangeErrorKind> {
    if clause.is_empty() {
        return Err(RangeErrorKind::Empty);
    }

    if clause.starts_with(['=', '!', '<', '>']) || clause.starts_with("~=") {
        let specifier = VersionSpecifier::from_str(clause)?;
        return Ok(RangeToken::Comparator(specifier));
    }

    let mut s = Scanner::new(clause);
    let epoch = eat_epoch(&mut s)?;

    // A lone star. `*.*` is handled together with the other placeholders.
    if let Some(rest) = s.after().strip_prefix('*') {
        if !rest.starts_with('.') {
            if epoch.is_some() {
                return Err(RangeErrorKind::EpochOnWildcard);
            }
            let rest = rest.trim();
            if !rest.is_empty() {
                return Err(RangeErrorKind::TrailingAfterWildcard(rest.to_string()));
            }
            return Ok(RangeToken::Wildcard);
        }
    }

    let shorthand = if s.eat_if('^') {
        Some(Shorthand::Caret)
    } else if s.eat_if('~') {
        Some(Shorthand::Tilde)
    } else {
        None
    };
    s.eat_whitespace();
    let body = s.after();

    if let Some(captures) = PLACEHOLDER_RE.captures(body) {
        let components: Vec<&str> = captures["release"].split('.').collect();
        if components.iter().any(|component| is_placeholder(component)) {
            return placeholder(epoch, shorthand, &components, &captures["rest"]);
        }
    }

    if epoch.is_some() && body.contains('!') {
        return Err(RangeErrorKind::DuplicateEpoch);
    }
    let mut version = Version::from_str(body)?;
    if let Some(epoch) = epoch {
        version = version.with_epoch(epoch);
    }

    Ok(match shorthand {
        Some(Shorthand::Caret) => RangeToken::Caret(version),
        Some(Shorthand::Tilde) => RangeToken::Tilde(version),
        None if version.release().len() >= MAX_PLACEHOLDER_COMPONENTS => {
            RangeToken::Explicit(version)
        }
        None => RangeToken::Prefix(version),
    })
}

/// Consume an `N!` epoch prefix, leaving the scanner untouched if there is none.
fn eat_epoch(s: &mut Scanner) -> Result<Option<u64>, RangeErrorKind> {
    let start = s.cursor();
    let digits = s.eat_while(|c: char| c.is_ascii_digit());
    if !digits.is_empty() && s.eat_if('!') {
        return digits
            .parse::<u64>()
            .map(Some)
            .map_err(|_| RangeErrorKind::InvalidEpoch(digits.to_string()));
    }
    s.jump(start);
    Ok(None)
}

fn is_placeholder(component: &str) -> bool {
    matches!(component, "x" | "X" | "*")
}

fn placeholder(
    epoch: Option<u64>,
    shorthand: Option<Shorthand>,
    components: &[&str],
    rest: &str,
) -> Result<RangeToken, RangeErrorKind> {
    if let Some(shorthand) = shorthand {
        return Err(RangeErrorKind::PlaceholderWithOperator {
            operator: shorthand.as_char(),
        });
    }
    if !rest.is_empty() {
        return Err(RangeErrorKind::PlaceholderRemainder(rest.to_string()));
    }
    if components.len() > MAX_PLACEHOLDER_COMPONENTS {
        return Err(RangeErrorKind::TooManyComponents(components.len()));
    }

    let explicit = components
        .iter()
        .take_while(|component| !is_placeholder(component))
        .map(|component| {
            component
                .parse::<u64>()
                .map_err(|_| InvalidVersionError::Number {
                    field: "release",
                    value: (*component).to_string(),
                })
        })
        .collect::<Result<Vec<u64>, _>>()?;
    if !components[explicit.len()..]
        .iter()
        .all(|component| is_placeholder(component))
    {
        return Err(RangeErrorKind::NonTrailingPlaceholder(components.join(".")));
    }

    if explicit.is_empty() {
        if epoch.is_some() {
            return Err(RangeErrorKind::EpochOnWildcard);
        }
        return Ok(RangeToken::Wildcard);
    }
    Ok(RangeToken::Prefix(
        Version::new(explicit).with_epoch(epoch.unwrap_or_default()),
    ))
}

/// Compile a token into the comparators it stands for.
pub(crate) fn compile(token: RangeToken) -> Result<Vec<VersionSpecifier>, RangeErrorKind> {
    #[cfg(feature = "tracing")]
    tracing::debug!("Compiling range clause: {token:?}");

    match token {
        RangeToken::Wildcard => Ok(Vec::new()),
        RangeToken::Explicit(version) => Ok(vec![VersionSpecifier::equals_version(version)]),
        RangeToken::Comparator(specifier) => Ok(vec![specifier]),
        RangeToken::Prefix(version) => bounded(version, prefix_upper),
        RangeToken::Caret(version) => bounded(version, caret_upper),
        RangeToken::Tilde(version) => bounded(version, tilde_upper),
    }
}

/// `>=version, <upper` where the release component at index `bump(release)` is incremented for
/// the upper bound.
fn bounded(
    version: Version,
    bump: fn(&[u64]) -> usize,
) -> Result<Vec<VersionSpecifier>, RangeErrorKind> {
    let upper = bump_release(version.release(), bump(version.release()))
        .ok_or(RangeErrorKind::UpperBoundOverflow)?;
    let upper = Version::new(upper).with_epoch(version.epoch());
    let lower_release = pad_release(version.release());
    let lower = version.with_release(lower_release);
    Ok(vec![
        VersionSpecifier::greater_than_equal_version(lower),
        VersionSpecifier::less_than_version(upper),
    ])
}

/// Pad a release with zeros to `major.minor.patch`.
pub(crate) fn pad_release(release: &[u64]) -> Vec<u64> {
    let mut padded = release.to_vec();
    if padded.len() < MAX_PLACEHOLDER_COMPONENTS {
        padded.resize(MAX_PLACEHOLDER_COMPONENTS, 0);
    }
    padded
}

/// Keep the components before `position`, increment the one at `position` and zero the rest,
/// e.g. `1.2.3` bumped at 1 is `1.3.0`. `None` if the component overflows.
pub(crate) fn bump_release(release: &[u64], position: usize) -> Option<Vec<u64>> {
    let component = |idx: usize| release.get(idx).copied().unwrap_or_default();
    let mut bumped: Vec<u64> = (0..position).map(component).collect();
    bumped.push(component(position).checked_add(1)?);
    if bumped.len() < MAX_PLACEHOLDER_COMPONENTS {
        bumped.resize(MAX_PLACEHOLDER_COMPONENTS, 0);
    }
    Some(bumped)
}

/// The leftmost non-zero of major, minor and patch. Components missing from the input stop the
/// scan, so `^0` is `<1.0.0` and `^0.0` is `<0.1.0`.
pub(crate) fn caret_upper(release: &[u64]) -> usize {
    match release {
        [major, ..] if *major != 0 => 0,
        [_] => 0,
        [_, minor, ..] if *minor != 0 => 1,
        [_, _] => 1,
        _ => 2,
    }
}

/// The minor version, or the major version if that's all there is.
pub(crate) fn tilde_upper(release: &[u64]) -> usize {
    if release.len() == 1 { 0 } else { 1 }
}

/// The last given component: `1.2.x` is `<1.3.0`.
fn prefix_upper(release: &[u64]) -> usize {
    release.len().saturating_sub(1)
}
