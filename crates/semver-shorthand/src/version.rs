use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// The PEP 440 version grammar, extended with an optional trailing `.*` for prefix matching
/// in comparators.
///
/// See <https://peps.python.org/pep-0440/#appendix-b-parsing-version-strings-with-regular-expressions>.
const VERSION_RE_INNER: &str = r"
(?:
    (?:v?)                                            # <https://peps.python.org/pep-0440/#preceding-v-character>
    (?:(?P<epoch>[0-9]+)!)?                           # epoch
    (?P<release>[0-9]+(?:\.[0-9]+)*)                  # release segment
    (?P<pre_field>                                    # pre-release
        [-_\.]?
        (?P<pre_name>(alpha|a|beta|b|preview|pre|rc|c))
        [-_\.]?
        (?P<pre>[0-9]+)?
    )?
    (?P<post_field>                                   # post release
        (?:-(?P<post_old>[0-9]+))
        |
        (?:
            [-_\.]?
            (?P<post_l>post|rev|r)
            [-_\.]?
            (?P<post_new>[0-9]+)?
        )
    )?
    (?P<dev_field>                                    # dev release
        [-_\.]?
        (?P<dev_l>dev)
        [-_\.]?
        (?P<dev>[0-9]+)?
    )?
)
(?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?       # local version
(?P<trailing_dot_star>\.\*)?                          # `==1.2.*` and `!=1.2.*`
";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?xi)^(?:\s*){VERSION_RE_INNER}(?:\s*)$"))
        .expect("the version grammar is a valid regex")
});

/// One of `~=` `==` `!=` `<=` `>=` `<` `>`, where `==` and `!=` additionally come in a
/// prefix-matching (`== 1.2.*`) flavor.
#[derive(Eq, PartialEq, Debug, Hash, Clone, Copy, Ord, PartialOrd)]
pub enum Operator {
    /// `== 1.2.3`
    Equal,
    /// `== 1.2.*`
    EqualStar,
    /// `!= 1.2.3`
    NotEqual,
    /// `!= 1.2.*`
    NotEqualStar,
    /// `~= 1.2`, the compatible release clause.
    TildeEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
}

impl Operator {
    /// The prefix-matching variant of this operator, if there is one.
    pub(crate) fn to_star(self) -> Option<Self> {
        match self {
            Self::Equal => Some(Self::EqualStar),
            Self::NotEqual => Some(Self::NotEqualStar),
            _ => None,
        }
    }

    /// Whether a version with a local label may follow this operator.
    ///
    /// "Local version identifiers are NOT permitted in this version specifier" applies to every
    /// operator except (in)equality.
    pub(crate) fn is_local_compatible(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

/// An operator that isn't one of `~=` `==` `!=` `<=` `>=` `<` `>`.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("No such comparison operator '{got}', must be one of ~= == != <= >= < >")]
pub struct OperatorParseError {
    pub(crate) got: String,
}

impl FromStr for Operator {
    type Err = OperatorParseError;

    /// Notably, this does not know about star versions, it just assumes the base operator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operator = match s {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "~=" => Self::TildeEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessThanEqual,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanEqual,
            other => {
                return Err(OperatorParseError {
                    got: other.to_string(),
                });
            }
        };
        Ok(operator)
    }
}

impl Display for Operator {
    /// Note that the star variants print without their star, which belongs to the version.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Equal | Self::EqualStar => "==",
            Self::NotEqual | Self::NotEqualStar => "!=",
            Self::TildeEqual => "~=",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
        };
        f.write_str(operator)
    }
}

/// Optional pre-release modifier (alpha, beta or release candidate) appended to a version.
///
/// <https://peps.python.org/pep-0440/#pre-releases>
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Ord, PartialOrd)]
pub enum PreRelease {
    /// alpha pre-release
    Alpha,
    /// beta pre-release
    Beta,
    /// release candidate
    Rc,
}

impl PreRelease {
    fn from_spelling(spelling: &str) -> Option<Self> {
        match spelling.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Some(Self::Alpha),
            "b" | "beta" => Some(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Some(Self::Rc),
            _ => None,
        }
    }
}

impl Display for PreRelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => f.write_str("a"),
            Self::Beta => f.write_str("b"),
            Self::Rc => f.write_str("rc"),
        }
    }
}

/// A part of the [local version identifier](https://peps.python.org/pep-0440/#local-version-identifiers).
///
/// Segments made of ASCII digits compare numerically, everything else compares
/// lexicographically (case-insensitive, so we store it lowercased). A numeric segment is always
/// greater than a lexicographic one, and with equal leading segments, more segments win. The
/// derived `Ord` of `Vec<LocalSegment>` gives us the last rule for free.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum LocalSegment {
    /// Not-parseable as integer segment of local version
    String(String),
    /// Inferred integer segment of local version
    Number(u64),
}

impl LocalSegment {
    fn parse(segment: &str) -> Self {
        if let Ok(number) = segment.parse::<u64>() {
            Self::Number(number)
        } else {
            Self::String(segment.to_ascii_lowercase())
        }
    }
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(string) => write!(f, "{string}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(n1), Self::Number(n2)) => n1.cmp(n2),
            (Self::String(s1), Self::String(s2)) => s1.cmp(s2),
            (Self::Number(_), Self::String(_)) => Ordering::Greater,
            (Self::String(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

/// A string that is not a valid version.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum InvalidVersionError {
    #[error("Version `{0}` doesn't match PEP 440 rules")]
    NoMatch(String),
    #[error("A star (`*`) must not be used in a fixed version: `{0}`")]
    Wildcard(String),
    #[error("You can't have both a trailing `.*` and a {0} version")]
    WildcardWithSuffix(&'static str),
    #[error("Couldn't parse `{value}` as number from {field}")]
    Number { field: &'static str, value: String },
}

/// A version number such as `1.2.3` or `4!5.6.7-a8.post9.dev0`.
///
/// The ordering implemented with [`Ord`] and [`Eq`] is the PEP 440 total order. It is not the
/// same thing as matching: `1.0+local > 1.0` when sorting, but `==1.0` matches `1.0+local`. See
/// [`crate::VersionSpecifier::contains`] for the matching rules.
///
/// ```rust
/// use std::str::FromStr;
/// use semver_shorthand::Version;
///
/// let version = Version::from_str("1!2.0rc1.post3").unwrap();
/// assert_eq!(version.epoch(), 1);
/// assert!(Version::from_str("2.0").unwrap() < Version::from_str("2.0.post1").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    /// Never empty.
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// Create a final release version such as `3.8` from its release numbers.
    ///
    /// # Panics
    ///
    /// When the release is empty.
    pub fn new<I>(release: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let release: Vec<u64> = release.into_iter().collect();
        assert!(!release.is_empty(), "a release needs at least one component");
        Self {
            epoch: 0,
            release,
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    #[must_use]
    pub fn with_epoch(self, epoch: u64) -> Self {
        Self { epoch, ..self }
    }

    /// Replace the release numbers, keeping every other field.
    ///
    /// An empty release is ignored.
    #[must_use]
    pub fn with_release(self, release: Vec<u64>) -> Self {
        if release.is_empty() {
            return self;
        }
        Self { release, ..self }
    }

    /// Strip the local label, which comparators without their own label ignore.
    #[must_use]
    pub fn without_local(&self) -> Self {
        Self {
            local: None,
            ..self.clone()
        }
    }

    /// Strip the epoch, used to render the epoch in front of a shorthand operator.
    #[must_use]
    pub(crate) fn without_epoch(&self) -> Self {
        Self {
            epoch: 0,
            ..self.clone()
        }
    }

    /// The [versioning epoch](https://peps.python.org/pep-0440/#version-epochs), normally 0.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The release numbers, e.g. `[1, 2, 3]` for `4!1.2.3-a8.post9.dev1`.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn pre(&self) -> Option<(PreRelease, u64)> {
        self.pre
    }

    pub fn post(&self) -> Option<u64> {
        self.post
    }

    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The local label segments, such as `["deadbeef"]` in `1.2.3+deadbeef`.
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// Whether this is an alpha/beta/rc or dev version
    pub fn any_prerelease(&self) -> bool {
        self.is_pre() || self.is_dev()
    }

    /// Whether this is an alpha/beta/rc version
    pub fn is_pre(&self) -> bool {
        self.pre.is_some()
    }

    /// Whether this is a dev version
    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this is a post version
    pub fn is_post(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a local version (e.g. `1.2.3+localsuffixesareweird`)
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Whether anything beyond epoch and release is set.
    pub fn has_suffix(&self) -> bool {
        self.any_prerelease() || self.is_post() || self.is_local()
    }

    /// Like [`Version::from_str`], but also allows the version to end with a star and returns
    /// whether it did. This variant is for use in comparators.
    ///  * `1.2.3` -> false
    ///  * `1.2.3.*` -> true
    ///  * `1.2.*.4` -> err
    ///  * `1.0-dev1.*` -> err
    pub fn from_str_star(version: &str) -> Result<(Self, bool), InvalidVersionError> {
        let captures = VERSION_RE
            .captures(version)
            .ok_or_else(|| InvalidVersionError::NoMatch(version.to_string()))?;
        Self::parse_impl(&captures)
    }

    fn parse_impl(captures: &Captures) -> Result<(Self, bool), InvalidVersionError> {
        let number_field = |field: &'static str| -> Result<Option<u64>, InvalidVersionError> {
            captures
                .name(field)
                .map(|value| {
                    value
                        .as_str()
                        .parse::<u64>()
                        .map_err(|_| InvalidVersionError::Number {
                            field,
                            value: value.as_str().to_string(),
                        })
                })
                .transpose()
        };

        // "If no explicit epoch is given, the implicit epoch is 0"
        let epoch = number_field("epoch")?.unwrap_or_default();
        let pre = match captures
            .name("pre_name")
            .and_then(|name| PreRelease::from_spelling(name.as_str()))
        {
            // <https://peps.python.org/pep-0440/#implicit-pre-release-number>
            Some(kind) => Some((kind, number_field("pre")?.unwrap_or_default())),
            None => None,
        };
        let post = if captures.name("post_field").is_some() {
            // `.post` without a number is `.post0`, like in pypa/packaging
            Some(
                number_field("post_new")?
                    .or(number_field("post_old")?)
                    .unwrap_or_default(),
            )
        } else {
            None
        };
        let dev = if captures.name("dev_field").is_some() {
            Some(number_field("dev")?.unwrap_or_default())
        } else {
            None
        };
        let local = captures.name("local").map(|local| {
            local
                .as_str()
                .split(['-', '_', '.'])
                .map(LocalSegment::parse)
                .collect()
        });
        let release = captures
            .name("release")
            .map(|release| release.as_str())
            .unwrap_or_default()
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| InvalidVersionError::Number {
                        field: "release",
                        value: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<u64>, _>>()?;

        let star = captures.name("trailing_dot_star").is_some();
        if star {
            if pre.is_some() {
                return Err(InvalidVersionError::WildcardWithSuffix("prerelease"));
            }
            if post.is_some() {
                return Err(InvalidVersionError::WildcardWithSuffix("post"));
            }
            if dev.is_some() {
                return Err(InvalidVersionError::WildcardWithSuffix("dev"));
            }
            if local.is_some() {
                return Err(InvalidVersionError::WildcardWithSuffix("local"));
            }
        }

        let version = Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        };
        Ok((version, star))
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    /// Parses a version such as `1.19`, `1.0a1`,`1.0+abc.5` or `1!2012.2`.
    ///
    /// This doesn't allow the version to end with a star, see [`Version::from_str_star`].
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let (parsed, star) = Self::from_str_star(version)?;
        if star {
            return Err(InvalidVersionError::Wildcard(version.to_string()));
        }
        Ok(parsed)
    }
}

/// Shows the normalized version.
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let mut release = self.release.iter();
        if let Some(first) = release.next() {
            write!(f, "{first}")?;
        }
        for number in release {
            write!(f, ".{number}")?;
        }
        if let Some((kind, number)) = self.pre {
            write!(f, "{kind}{number}")?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = &self.local {
            f.write_str("+")?;
            for (idx, segment) in local.iter().enumerate() {
                if idx > 0 {
                    f.write_str(".")?;
                }
                write!(f, "{segment}")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Compare the release parts of two versions, e.g. `4.3.1` > `4.2`, `1.1.0` == `1.1` and
/// `1.16` < `1.19`.
///
/// The shorter release is padded with zeros.
pub(crate) fn compare_release(this: &[u64], other: &[u64]) -> Ordering {
    let len = this.len().max(other.len());
    let this = this.iter().chain(iter::repeat(&0)).take(len);
    let other = other.iter().chain(iter::repeat(&0)).take(len);
    this.cmp(other)
}

/// Whether `release` starts with `prefix`, padding `release` with zeros.
pub(crate) fn release_starts_with(release: &[u64], prefix: &[u64]) -> bool {
    prefix
        .iter()
        .enumerate()
        .all(|(idx, number)| release.get(idx).copied().unwrap_or_default() == *number)
}

/// Everything after the release as one sortable key, given equal epoch and release.
///
/// PEP 440 orders the suffixes as `.devN, aN, bN, rcN, <no suffix (final)>, .postN`, but a dev
/// or post release can also hang off a pre-release, so the key has stages:
/// `({dev: 0, a: 1, b: 2, rc: 3, (): 4, post: 5}, <preN>, <postN or None>, <devN or MAX>, <local>)`.
///
/// Any post number beats none (`None < Some(0)`), while for dev no number is larger than any
/// number, hence `u64::MAX`. `Option<&[LocalSegment]>` already orders absence first.
fn sortable_tuple(version: &Version) -> (u8, u64, Option<u64>, u64, Option<&[LocalSegment]>) {
    let local = version.local.as_deref();
    match (version.pre, version.post, version.dev) {
        // dev release of a final release
        (None, None, Some(dev)) => (0, 0, None, dev, local),
        (Some((kind, number)), post, dev) => {
            let stage = match kind {
                PreRelease::Alpha => 1,
                PreRelease::Beta => 2,
                PreRelease::Rc => 3,
            };
            (stage, number, post, dev.unwrap_or(u64::MAX), local)
        }
        (None, None, None) => (4, 0, None, 0, local),
        (None, Some(post), dev) => (5, 0, Some(post), dev.unwrap_or(u64::MAX), local),
    }
}

impl PartialEq<Self> for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Trailing zeros are skipped since equality zero-pads the release, and the suffixes are
    /// hashed through the same key that orders them.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        let significant = self
            .release
            .iter()
            .rposition(|number| *number != 0)
            .map_or(0, |idx| idx + 1);
        self.release[..significant].hash(state);
        sortable_tuple(self).hash(state);
    }
}

impl PartialOrd<Self> for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// 1.0.dev456 < 1.0a1 < 1.0a2.dev456 < 1.0a12.dev456 < 1.0a12 < 1.0b1.dev456 < 1.0b2
    /// < 1.0b2.post345.dev456 < 1.0b2.post345 < 1.0c1.dev456 < 1.0c1 < 1.0rc2 < 1.0
    /// < 1.0.post456.dev34 < 1.0.post456 < 1.0.post456+local
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_release(&self.release, &other.release))
            .then_with(|| sortable_tuple(self).cmp(&sortable_tuple(other)))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::hash::{BuildHasher, RandomState};
    use std::str::FromStr;

    use test_case::test_case;

    use super::{InvalidVersionError, LocalSegment, PreRelease, Version};

    /// In ascending order, adapted from the pypa/packaging test-suite.
    const SORTED: &[&str] = &[
        "1.0.dev456",
        "1.0a1",
        "1.0a2.dev456",
        "1.0a12.dev456",
        "1.0a12",
        "1.0b1.dev456",
        "1.0b2",
        "1.0b2.post345.dev456",
        "1.0b2.post345",
        "1.0b2-346",
        "1.0c1.dev456",
        "1.0c1",
        "1.0rc2",
        "1.0c3",
        "1.0",
        "1.0.post456.dev34",
        "1.0.post456",
        "1.1.dev1",
        "1.2+123abc",
        "1.2+123abc456",
        "1.2+abc",
        "1.2+abc123",
        "1.2+abc123def",
        "1.2+1234.abc",
        "1.2+123456",
        "1.2.r32+123456",
        "1.2.rev33+123456",
        "1!0.1",
        "1!1.0.dev456",
        "1!1.0a1",
        "1!1.0",
        "1!1.0.post456",
        "2!0.0.1",
    ];

    #[test]
    fn total_order() {
        let versions: Vec<Version> = SORTED
            .iter()
            .map(|version| Version::from_str(version).unwrap())
            .collect();
        for (i, a) in versions.iter().enumerate() {
            for (j, b) in versions.iter().enumerate() {
                assert_eq!(a.cmp(b), i.cmp(&j), "{a} {:?} {b}", i.cmp(&j));
            }
        }
    }

    #[test_case("1.0dev", "1.0.dev0")]
    #[test_case("1.0-DEV1", "1.0.dev1")]
    #[test_case("1.0.alpha1", "1.0a1")]
    #[test_case("1.0-B", "1.0b0")]
    #[test_case("1.0.preview2", "1.0rc2")]
    #[test_case("1.0c", "1.0rc0")]
    #[test_case("1.0-5", "1.0.post5")]
    #[test_case("1.0.rev1", "1.0.post1")]
    #[test_case("1.0POST", "1.0.post0")]
    #[test_case("1.0+AbC", "1.0+abc")]
    #[test_case("1.0+ubuntu-1", "1.0+ubuntu.1")]
    #[test_case("1.01", "1.1")]
    #[test_case("1.0c056", "1.0rc56")]
    #[test_case("00!1.2", "1.2")]
    #[test_case("0100!0.0", "100!0.0")]
    #[test_case("v1.0", "1.0")]
    #[test_case("   v1.0\t\n", "1.0")]
    fn normalization(given: &str, normalized: &str) {
        let version = Version::from_str(given).unwrap();
        assert_eq!(version.to_string(), normalized);
        assert_eq!(version, Version::from_str(normalized).unwrap());
    }

    #[test]
    fn fields() {
        let version = Version::from_str("4!5.6.7-a8.post9.dev0+ubuntu.2").unwrap();
        assert_eq!(version.epoch(), 4);
        assert_eq!(version.release(), [5, 6, 7]);
        assert_eq!(version.pre(), Some((PreRelease::Alpha, 8)));
        assert_eq!(version.post(), Some(9));
        assert_eq!(version.dev(), Some(0));
        assert_eq!(
            version.local(),
            Some(
                [
                    LocalSegment::String("ubuntu".to_string()),
                    LocalSegment::Number(2)
                ]
                .as_slice()
            )
        );
        assert!(version.has_suffix());
        assert!(!Version::new([1, 2]).with_epoch(3).has_suffix());
    }

    #[test]
    fn zero_padding() {
        let short = Version::from_str("1.1").unwrap();
        let long = Version::from_str("1.1.0.0").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.cmp(&long), Ordering::Equal);

        let state = RandomState::new();
        assert_eq!(state.hash_one(&short), state.hash_one(&long));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let state = RandomState::new();
        for (left, right) in [
            ("1.0a1.dev18446744073709551615", "1.0a1"),
            ("1.0.post2.dev18446744073709551615", "1.0.post2"),
            ("1.0rc1+local", "1.0.0rc1+local"),
        ] {
            let left = Version::from_str(left).unwrap();
            let right = Version::from_str(right).unwrap();
            assert_eq!(left, right);
            assert_eq!(state.hash_one(&left), state.hash_one(&right), "{left} vs {right}");
        }
    }

    #[test]
    fn suffix_precedence() {
        let parse = |version: &str| Version::from_str(version).unwrap();
        // Pre-release before final, final before post.
        assert!(parse("1.0.0a1") < parse("1.0.0"));
        assert!(parse("1.0.0") < parse("1.0.0.post1"));
        // Dev sorts before its non-dev counterpart.
        assert!(parse("1.0.0.post1.dev1") < parse("1.0.0.post1"));
        assert!(parse("1.0.0rc1.dev1") < parse("1.0.0rc1"));
        // Local labels break ties last.
        assert!(parse("1.0.0") < parse("1.0.0+abc"));
        assert!(parse("1.0.0+abc") < parse("1.0.0+1"));
        assert!(parse("1.0.0+1") < parse("1.0.0+1.a"));
        // The epoch dominates everything.
        assert!(parse("99.0") < parse("1!0.1"));
    }

    #[test]
    fn failures() {
        for version in [
            "french toast",
            "1.0+a+",
            "1.0++",
            "1.0+_foobar",
            "1.0+foo&asd",
            "1.0+1+1",
            "1..0",
            "1.0.",
            "",
        ] {
            assert_eq!(
                Version::from_str(version).unwrap_err(),
                InvalidVersionError::NoMatch(version.to_string())
            );
        }
    }

    #[test]
    fn star() {
        assert!(!Version::from_str_star("1.2.3").unwrap().1);
        assert!(Version::from_str_star("1.2.3.*").unwrap().1);
        assert_eq!(
            Version::from_str_star("1.2.*.4.*").unwrap_err(),
            InvalidVersionError::NoMatch("1.2.*.4.*".to_string())
        );
        assert_eq!(
            Version::from_str_star("1.0-dev1.*").unwrap_err().to_string(),
            "You can't have both a trailing `.*` and a dev version"
        );
        assert_eq!(
            Version::from_str_star("1.0a1.*").unwrap_err().to_string(),
            "You can't have both a trailing `.*` and a prerelease version"
        );
        assert_eq!(
            Version::from_str_star("1.0+lolwat.*").unwrap_err().to_string(),
            "You can't have both a trailing `.*` and a local version"
        );
        assert_eq!(
            Version::from_str("0.9.1.*").unwrap_err(),
            InvalidVersionError::Wildcard("0.9.1.*".to_string())
        );
    }

    #[test]
    fn overflow() {
        assert_eq!(
            Version::from_str("1.99999999999999999999").unwrap_err(),
            InvalidVersionError::Number {
                field: "release",
                value: "99999999999999999999".to_string()
            }
        );
    }
}
