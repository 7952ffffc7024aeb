use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::InvalidRangeError;
use crate::range_parser::{self, bump_release, caret_upper, pad_release, tilde_upper};
use crate::version::InvalidVersionError;
use crate::{Operator, Version, VersionSpecifier};

/// Sorted comparators that a version must all satisfy, such as `>=1.2.0, <2.0.0`.
///
/// An empty selector matches every version. The [`Display`] implementation renders the canonical
/// form, preferring the shorthand `^` and `~` operators where they express the same bounds.
///
/// ```rust
/// # use std::str::FromStr;
/// # use semver_shorthand::{Operator, Version, VersionSelector};
///
/// let selector = VersionSelector::from_str("1.x").unwrap();
/// assert!(selector.contains_version(&Version::from_str("1.2.3").unwrap()));
/// assert_eq!(selector.to_string(), "^1.0.0");
/// // VersionSelector derefs into a list of comparators
/// assert_eq!(selector.iter().position(|specifier| specifier.operator() == Operator::LessThan), Some(1));
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct VersionSelector(Vec<VersionSpecifier>);

impl std::ops::Deref for VersionSelector {
    type Target = [VersionSpecifier];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl VersionSelector {
    /// Matches all versions.
    pub fn any() -> Self {
        Self(Vec::new())
    }

    /// Whether this selector matches every version.
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// The comparators, sorted by version.
    pub fn comparators(&self) -> &[VersionSpecifier] {
        &self.0
    }

    /// Whether all comparators match the given version string.
    ///
    /// A version that doesn't parse is an error for this call only; the selector stays usable.
    pub fn contains(&self, version: &str) -> Result<bool, InvalidVersionError> {
        let version = Version::from_str(version)?;
        Ok(self.contains_version(&version))
    }

    /// Whether all comparators match the given version.
    pub fn contains_version(&self, version: &Version) -> bool {
        self.iter().all(|specifier| {
            let contained = specifier.contains(version);
            #[cfg(feature = "tracing")]
            if !contained {
                tracing::trace!("{version} rejected by `{specifier}`");
            }
            contained
        })
    }

    /// Sort the comparators by version, then by operator, so that the order of the clauses in
    /// the input doesn't matter.
    pub(crate) fn from_unsorted(mut specifiers: Vec<VersionSpecifier>) -> Self {
        specifiers.sort_by(|a, b| {
            a.version()
                .cmp(b.version())
                .then_with(|| a.operator().cmp(&b.operator()))
        });
        Self(specifiers)
    }

    /// The shorthand operator that compiles to exactly `[lower, upper]`, if any.
    fn shorthand(lower: &VersionSpecifier, upper: &VersionSpecifier) -> Option<char> {
        if lower.operator() != Operator::GreaterThanEqual
            || upper.operator() != Operator::LessThan
            || lower.version().epoch() != upper.version().epoch()
            || upper.version().has_suffix()
        {
            return None;
        }
        let release = pad_release(lower.version().release());
        let bound = |position: usize| {
            bump_release(&release, position)
                .map(|bumped| Version::new(bumped).with_epoch(lower.version().epoch()))
        };
        if bound(caret_upper(&release)).as_ref() == Some(upper.version()) {
            Some('^')
        } else if bound(tilde_upper(&release)).as_ref() == Some(upper.version()) {
            Some('~')
        } else {
            None
        }
    }
}

impl FromIterator<VersionSpecifier> for VersionSelector {
    fn from_iter<T: IntoIterator<Item = VersionSpecifier>>(iter: T) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl From<VersionSpecifier> for VersionSelector {
    fn from(specifier: VersionSpecifier) -> Self {
        Self(vec![specifier])
    }
}

impl FromStr for VersionSelector {
    type Err = InvalidRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        range_parser::parse(s)
    }
}

/// The canonical form.
impl Display for VersionSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.as_slice() {
            [] => return f.write_str("*"),
            [exact]
                if exact.operator() == Operator::Equal && exact.version().release().len() >= 3 =>
            {
                return write!(f, "{}", exact.version());
            }
            [lower, upper] => {
                if let Some(operator) = Self::shorthand(lower, upper) {
                    let version = lower.version();
                    if version.epoch() != 0 {
                        write!(f, "{}!", version.epoch())?;
                    }
                    let padded = version
                        .without_epoch()
                        .with_release(pad_release(version.release()));
                    return write!(f, "{operator}{padded}");
                }
            }
            _ => {}
        }

        for (idx, specifier) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{specifier}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for VersionSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for VersionSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::version::InvalidVersionError;
    use crate::{Operator, Version, VersionSpecifier};

    use super::VersionSelector;

    fn selector(range: &str) -> VersionSelector {
        VersionSelector::from_str(range).unwrap()
    }

    #[test]
    fn canonical() {
        for (range, canonical) in [
            ("*", "*"),
            ("x", "*"),
            ("x.x.x", "*"),
            ("1", "^1.0.0"),
            ("1.x", "^1.0.0"),
            ("1.x.x", "^1.0.0"),
            ("1!1", "1!^1.0.0"),
            ("^1.0.4", "^1.0.4"),
            ("1!^1.0.4", "1!^1.0.4"),
            ("^1.2", "^1.2.0"),
            ("^0.2.3", "^0.2.3"),
            ("^0.0.3", "^0.0.3"),
            ("1.0", "~1.0.0"),
            ("1.0.x", "~1.0.0"),
            ("~1.0.4", "~1.0.4"),
            ("~1.2", "~1.2.0"),
            ("~1", "^1.0.0"),
            ("1.0.4", "1.0.4"),
            ("1.0.4.dev1", "1.0.4.dev1"),
            ("==1.0.4", "1.0.4"),
            ("^1.0.4rc1", "^1.0.4rc1"),
            (">=1.0, <2", "^1.0.0"),
            (">=1.2.3, <1.3", "~1.2.3"),
            ("==1.0", "==1.0"),
            ("^0", ">=0.0.0, <1.0.0"),
            (">=1.0, <3.0", ">=1.0, <3.0"),
            ("^1.2, !=1.4.0", ">=1.2.0, !=1.4.0, <2.0.0"),
        ] {
            assert_eq!(selector(range).to_string(), canonical);
        }
    }

    #[test]
    fn canonical_is_idempotent() {
        for range in [
            "*",
            "1.x",
            "1!1",
            "1.0",
            "^0.0",
            "^0",
            "~1.0.4",
            "2!^1.0.4a1.post2",
            "11.2.3.a2+gdeadbeef",
            "^1.2, !=1.4.0",
        ] {
            let canonical = selector(range).to_string();
            assert_eq!(selector(&canonical), selector(range), "{range} -> {canonical}");
            assert_eq!(selector(&canonical).to_string(), canonical);
        }
    }

    #[test]
    fn equivalences() {
        // Placeholders and bare versions.
        assert_eq!(selector("1.x"), selector("1"));
        assert_eq!(selector("1.x"), selector("1.x.x"));
        assert_eq!(selector("1.x"), selector("^1.0.0"));
        assert_eq!(selector("1.0.x"), selector("1.0"));
        assert_eq!(selector("1.0.x"), selector("~1.0.0"));
        // Caret and tilde spelled out.
        assert_eq!(selector("^1.2.3"), selector(">=1.2.3, <2.0.0"));
        assert_eq!(selector("^0.2.3"), selector(">=0.2.3, <0.3.0"));
        assert_eq!(selector("^0.0.3"), selector(">=0.0.3, <0.0.4"));
        assert_eq!(selector("~1.2.3"), selector(">=1.2.3, <1.3.0"));
        assert_eq!(selector("~1.2"), selector(">=1.2.0, <1.3.0"));
        // Order doesn't matter.
        assert_eq!(selector("<2, >=1"), selector(">=1, <2"));
    }

    #[test]
    fn equal_versions_sort_by_operator() {
        let forward = selector(">=1.0, !=1.0.0");
        let backward = selector("!=1.0.0, >=1.0");
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), backward.to_string());
        assert_eq!(forward.to_string(), "!=1.0.0, >=1.0");

        let forward = selector("<=2.0, >=1.0, ~=1.0, ==1.*");
        let backward = selector("==1.*, ~=1.0, >=1.0, <=2.0");
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), "==1.*, ~=1.0, >=1.0, <=2.0");
    }

    #[test]
    fn caret_and_tilde_bounds() {
        for major in 0..3u64 {
            for minor in 0..3u64 {
                for patch in 0..3u64 {
                    let caret_upper = if major > 0 {
                        format!("{}.0.0", major + 1)
                    } else if minor > 0 {
                        format!("0.{}.0", minor + 1)
                    } else {
                        format!("0.0.{}", patch + 1)
                    };
                    assert_eq!(
                        selector(&format!("^{major}.{minor}.{patch}")),
                        selector(&format!(">={major}.{minor}.{patch}, <{caret_upper}")),
                    );
                    assert_eq!(
                        selector(&format!("~{major}.{minor}.{patch}")),
                        selector(&format!(">={major}.{minor}.{patch}, <{major}.{}.0", minor + 1)),
                    );
                }
            }
            if major > 0 {
                assert_eq!(selector(&format!("{major}.x")), selector(&format!("^{major}.0.0")));
                assert_eq!(selector(&format!("{major}.x")), selector(&format!("{major}.x.x")));
            }
        }
    }

    #[test]
    fn wildcard_accepts_everything() {
        let any = selector("*");
        assert!(any.is_any());
        assert_eq!(any, VersionSelector::any());
        for version in ["0", "1.0.0", "1!0.1", "2.0a1", "3.0.post1.dev2", "4.0+local"] {
            assert!(any.contains(version).unwrap(), "{version}");
        }
    }

    #[test]
    fn contains() {
        let placeholder = selector("1.x");
        assert!(placeholder.contains("1.2.3").unwrap());
        assert!(!placeholder.contains("0.9.9").unwrap());
        assert!(!placeholder.contains("2.0.0").unwrap());

        let tilde = selector("~1.0.3");
        assert!(tilde.contains("1.0.9").unwrap());
        assert!(!tilde.contains("1.1.0").unwrap());

        let epoch = selector("2!^1.0.4");
        assert!(!epoch.contains("1.0.4").unwrap());
        assert!(epoch.contains("2!1.0.9").unwrap());
        assert!(!epoch.contains("2!2.0.0").unwrap());

        let patch = selector("1.0.x");
        assert!(patch.contains("1.0.0").unwrap());
        assert!(!patch.contains("1.1.0").unwrap());

        let exact = selector("1.0.4");
        assert!(exact.contains("1.0.4").unwrap());
        assert!(exact.contains("1.0.4+local").unwrap());
        assert!(!exact.contains("1.0.5").unwrap());

        // Pre-releases of the upper bound are out of range.
        let caret = selector("^1.0.4");
        assert!(!caret.contains("2.0.0a1").unwrap());
        assert!(caret.contains("1.9.9.post1").unwrap());

        // And pre-releases below the lower bound as well.
        assert!(!caret.contains("1.0.4rc1").unwrap());
        assert!(selector("^1.0.4rc1").contains("1.0.4rc1").unwrap());
    }

    #[test]
    fn conjunction() {
        let selector = selector("^1.2, !=1.4.0, !=1.5.*");
        assert!(selector.contains("1.3.0").unwrap());
        assert!(!selector.contains("1.4.0").unwrap());
        assert!(!selector.contains("1.5.2").unwrap());
        assert!(selector.contains("1.6").unwrap());
        assert!(!selector.contains("2.0").unwrap());
    }

    #[test]
    fn invalid_version_does_not_poison_selector() {
        let selector = selector("^1.0");
        assert_eq!(
            selector.contains("not a version").unwrap_err(),
            InvalidVersionError::NoMatch("not a version".to_string())
        );
        assert!(selector.contains("1.1").unwrap());
    }

    #[test]
    fn comparators() {
        let selector = selector("~1.2");
        assert_eq!(
            selector.comparators(),
            [
                VersionSpecifier::greater_than_equal_version(Version::new([1, 2, 0])),
                VersionSpecifier::less_than_version(Version::new([1, 3, 0])),
            ]
        );
        assert_eq!(selector[1].operator(), Operator::LessThan);

        let collected: VersionSelector = selector.iter().rev().cloned().collect();
        assert_eq!(collected, selector);

        let single = VersionSelector::from(VersionSpecifier::from_str("!=1.0").unwrap());
        assert_eq!(single.to_string(), "!=1.0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let selector: VersionSelector = serde_json::from_str(r#""1.0.x""#).unwrap();
        assert_eq!(serde_json::to_string(&selector).unwrap(), r#""~1.0.0""#);
    }
}
