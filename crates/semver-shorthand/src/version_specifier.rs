use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::version::{self, InvalidVersionError, OperatorParseError};
use crate::{Operator, Version};

/// A single comparator such as `>1.2.3`, `<=4!5.6.7-a8.post9.dev0` or `== 4.1.*`.
///
/// ```rust
/// use std::str::FromStr;
/// use semver_shorthand::{Version, VersionSpecifier};
///
/// let version = Version::from_str("1.19").unwrap();
/// let version_specifier = VersionSpecifier::from_str("== 1.*").unwrap();
/// assert!(version_specifier.contains(&version));
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VersionSpecifier {
    /// ~=|==|!=|<=|>=|<|>, plus whether the version ended with a star
    pub(crate) operator: Operator,
    /// The whole version part behind the operator
    pub(crate) version: Version,
}

impl VersionSpecifier {
    /// Build from parts, validating that the operator is allowed with that version. The last
    /// parameter indicates a trailing `.*`, to differentiate between `1.1.*` and `1.1`.
    pub fn from_pattern(
        operator: Operator,
        version: Version,
        star: bool,
    ) -> Result<Self, VersionSpecifierBuildError> {
        let operator = if star {
            operator
                .to_star()
                .ok_or(VersionSpecifierBuildError::OperatorWithStar { operator })?
        } else {
            operator
        };
        Self::from_version(operator, version)
    }

    /// Create a new comparator from an operator and a version.
    pub fn from_version(
        operator: Operator,
        version: Version,
    ) -> Result<Self, VersionSpecifierBuildError> {
        if let Some(local) = version.local() {
            if !operator.is_local_compatible() {
                let local = local
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(".");
                return Err(VersionSpecifierBuildError::OperatorLocalCombo { operator, local });
            }
        }

        if operator == Operator::TildeEqual && version.release().len() < 2 {
            return Err(VersionSpecifierBuildError::CompatibleRelease);
        }

        Ok(Self { operator, version })
    }

    /// `==<version>`
    pub fn equals_version(version: Version) -> Self {
        Self {
            operator: Operator::Equal,
            version,
        }
    }

    /// `>=<version>`, without the local label check since shorthand lower bounds keep their
    /// suffixes verbatim.
    pub fn greater_than_equal_version(version: Version) -> Self {
        Self {
            operator: Operator::GreaterThanEqual,
            version,
        }
    }

    /// `<<version>`
    pub fn less_than_version(version: Version) -> Self {
        Self {
            operator: Operator::LessThan,
            version,
        }
    }

    /// Get the operator, e.g. `>=` in `>= 2.0.0`
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the version, e.g. `2.0.0` in `<= 2.0.0`
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the operator and version parts of this comparator.
    pub fn into_parts(self) -> (Operator, Version) {
        (self.operator, self.version)
    }

    /// Whether the given version satisfies this comparator.
    ///
    /// For example, `>=1.19` contains `1.21`, but not `1.18`.
    ///
    /// See:
    /// - <https://peps.python.org/pep-0440/#version-specifiers>
    /// - <https://github.com/pypa/packaging/blob/e184feef1a28a5c574ec41f5c263a3a573861f5a/packaging/specifiers.py#L362-L496>
    pub fn contains(&self, version: &Version) -> bool {
        // "Except where specifically noted below, local version identifiers MUST NOT be permitted
        // in version specifiers, and local version labels MUST be ignored entirely when checking
        // if candidate versions match a given version specifier."
        let this = &self.version;
        let other = if this.is_local() {
            version.clone()
        } else {
            version.without_local()
        };

        match self.operator {
            Operator::Equal => other == *this,
            Operator::EqualStar => {
                this.epoch() == other.epoch()
                    && version::release_starts_with(other.release(), this.release())
            }
            Operator::NotEqual => other != *this,
            Operator::NotEqualStar => {
                this.epoch() != other.epoch()
                    || !version::release_starts_with(other.release(), this.release())
            }
            Operator::TildeEqual => {
                // "For a given release identifier V.N, the compatible release clause is
                // approximately equivalent to the pair of comparison clauses: `>= V.N, == V.*`"
                let Some((_, prefix)) = this.release().split_last() else {
                    return false;
                };
                this.epoch() == other.epoch()
                    && version::release_starts_with(other.release(), prefix)
                    && other >= *this
            }
            Operator::GreaterThan => Self::greater_than(this, &other),
            Operator::GreaterThanEqual => Self::greater_than(this, &other) || other >= *this,
            Operator::LessThan => Self::less_than(this, &other),
            Operator::LessThanEqual => Self::less_than(this, &other) || other <= *this,
        }
    }

    fn less_than(this: &Version, other: &Version) -> bool {
        if other.epoch() < this.epoch() {
            return true;
        }

        // Unless the comparator itself is a pre-release, `<3.1` must not match `3.1.dev0` or
        // `3.1a1`, but does match `3.0.dev0`.
        if !this.any_prerelease()
            && other.any_prerelease()
            && version::compare_release(this.release(), other.release()) == Ordering::Equal
        {
            return false;
        }

        other < this
    }

    fn greater_than(this: &Version, other: &Version) -> bool {
        if other.epoch() > this.epoch() {
            return true;
        }

        if version::compare_release(this.release(), other.release()) == Ordering::Equal {
            // Unless the comparator itself is a post-release, `>3.1` must not match
            // `3.1.post0`, but does match `3.2.post0`.
            if !this.is_post() && other.is_post() {
                return false;
            }

            // `other` only carries a local label when `this` does as well.
            if other.is_local() && !this.is_local() {
                return false;
            }
        }

        other > this
    }
}

impl FromStr for VersionSpecifier {
    type Err = VersionSpecifierParseError;

    /// Parses a comparator such as `>= 1.19`, `== 1.1.*`,`~=1.0` or `<=1!2012.2`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut s = unscanny::Scanner::new(spec);
        s.eat_whitespace();
        // operator but we don't know yet if it has a star
        let operator = s.eat_while(['=', '!', '~', '<', '>']);
        if operator.is_empty() {
            return Err(VersionSpecifierParseError::MissingOperator);
        }
        let operator = Operator::from_str(operator)?;
        s.eat_whitespace();
        let version = s.eat_while(|c: char| !c.is_whitespace());
        if version.is_empty() {
            return Err(VersionSpecifierParseError::MissingVersion);
        }
        let (version, star) = Version::from_str_star(version)?;
        let version_specifier = Self::from_pattern(operator, version, star)?;
        s.eat_whitespace();
        if !s.done() {
            return Err(VersionSpecifierParseError::InvalidTrailing(
                s.after().to_string(),
            ));
        }
        Ok(version_specifier)
    }
}

impl Display for VersionSpecifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if matches!(self.operator, Operator::EqualStar | Operator::NotEqualStar) {
            return write!(f, "{}{}.*", self.operator, self.version);
        }
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for VersionSpecifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for VersionSpecifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// An operator and version pair that don't belong together.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum VersionSpecifierBuildError {
    /// A version with a local label behind anything but `==` or `!=`.
    #[error(
        "Operator {operator} is incompatible with versions containing non-empty local segments (`+{local}`)"
    )]
    OperatorLocalCombo { operator: Operator, local: String },
    /// A `.*` version behind anything but `==` or `!=`.
    #[error("Operator {operator} cannot be used with a wildcard version specifier")]
    OperatorWithStar { operator: Operator },
    /// `~=` with a single release segment, such as `~=1`.
    #[error("The ~= operator requires at least two segments in the release version")]
    CompatibleRelease,
}

/// An error that can occur when parsing a comparator.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum VersionSpecifierParseError {
    #[error("Unexpected end of version specifier, expected operator")]
    MissingOperator,
    #[error(transparent)]
    InvalidOperator(#[from] OperatorParseError),
    #[error("Unexpected end of version specifier, expected version")]
    MissingVersion,
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersionError),
    #[error(transparent)]
    InvalidSpecifier(#[from] VersionSpecifierBuildError),
    #[error("Trailing `{0}` is not allowed")]
    InvalidTrailing(String),
}
