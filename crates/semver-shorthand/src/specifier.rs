use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::InvalidRangeError;
use crate::version::InvalidVersionError;
use crate::{Version, VersionSelector};

/// A shorthand range as the user wrote it, together with the selector it compiles to.
///
/// Two specifiers are equal when they select the same versions the same way, regardless of
/// spelling: `1.x` equals `^1.0.0`.
///
/// ```rust
/// use semver_shorthand::SemverSpecifier;
///
/// let specifier = SemverSpecifier::new("1.0.x").unwrap();
/// assert!(specifier.contains("1.0.9").unwrap());
/// assert!(!specifier.contains("1.1.0").unwrap());
/// assert_eq!(specifier.as_str(), "1.0.x");
/// assert_eq!(specifier.canonical(), "~1.0.0");
/// ```
#[derive(Debug, Clone)]
pub struct SemverSpecifier {
    given: String,
    selector: VersionSelector,
}

impl SemverSpecifier {
    /// Parse a range such as `^1.0.4`, `2!1.x` or `~1.2, !=1.2.5`.
    pub fn new(range: &str) -> Result<Self, InvalidRangeError> {
        let selector = VersionSelector::from_str(range)?;
        Ok(Self {
            given: range.to_string(),
            selector,
        })
    }

    /// The range as it was given.
    pub fn as_str(&self) -> &str {
        &self.given
    }

    pub fn selector(&self) -> &VersionSelector {
        &self.selector
    }

    pub fn into_selector(self) -> VersionSelector {
        self.selector
    }

    /// The canonical spelling of the range, e.g. `^1.0.0` for `1.x`.
    pub fn canonical(&self) -> String {
        self.selector.to_string()
    }

    /// Whether the version string lies in the range.
    pub fn contains(&self, version: &str) -> Result<bool, InvalidVersionError> {
        self.selector.contains(version)
    }

    /// Whether the version lies in the range.
    pub fn contains_version(&self, version: &Version) -> bool {
        self.selector.contains_version(version)
    }
}

impl FromStr for SemverSpecifier {
    type Err = InvalidRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Shows the range as it was given, see [`SemverSpecifier::canonical`] for the normalized form.
impl Display for SemverSpecifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.given)
    }
}

impl PartialEq for SemverSpecifier {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
    }
}

impl Eq for SemverSpecifier {}

impl Hash for SemverSpecifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selector.hash(state);
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SemverSpecifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(de::Error::custom)
    }
}

/// Keeps the original spelling.
#[cfg(feature = "serde")]
impl Serialize for SemverSpecifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.given)
    }
}
