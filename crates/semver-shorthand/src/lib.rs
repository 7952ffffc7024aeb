//! NPM-flavored shorthand version ranges on top of [PEP 440](https://peps.python.org/pep-0440)
//! versions.
//!
//! ```rust
//! use semver_shorthand::SemverSpecifier;
//!
//! let specifier = SemverSpecifier::new("1.x").unwrap();
//! assert!(specifier.contains("1.2.3").unwrap());
//! assert!(!specifier.contains("2.0.0").unwrap());
//! assert_eq!(specifier.canonical(), "^1.0.0");
//!
//! let specifier = SemverSpecifier::new("2!^1.0.4").unwrap();
//! assert!(specifier.contains("2!1.0.9").unwrap());
//! assert!(!specifier.contains("1.0.4").unwrap());
//! ```
//!
//! The shorthand forms compile into plain PEP 440 comparators:
//!
//! * `*`, `x`, `X` match everything.
//! * `1`, `1.x`, `1.x.x` are `>=1.0.0, <2.0.0`; `1.0` and `1.0.x` are `>=1.0.0, <1.1.0`.
//! * `^1.2.3` increments the leftmost non-zero component for its upper bound, so `^0.2.3` is
//!   `>=0.2.3, <0.3.0`.
//! * `~1.2.3` increments the minor version, `>=1.2.3, <1.3.0`.
//! * `1.2.3` is exactly `==1.2.3`.
//! * An epoch goes in front of the operator: `2!^1.0.4`.
//! * Anything starting with a PEP 440 operator (`>=1.0`, `!=1.2.*`, `~=1.4`) is taken as-is, and
//!   clauses can be combined with commas: `^1.2, !=1.4.0`.
//!
//! Matching follows PEP 440 rather than NPM, so e.g. `<2.0.0` does not match `2.0.0a1`, and a
//! local label such as `1.0.4+ubuntu` is ignored by `==1.0.4`.

pub use {
    error::{Error, InvalidRangeError, RangeErrorKind},
    range_parser::parse as parse_range,
    selector::VersionSelector,
    specifier::SemverSpecifier,
    version::{
        InvalidVersionError, LocalSegment, Operator, OperatorParseError, PreRelease, Version,
    },
    version_specifier::{
        VersionSpecifier, VersionSpecifierBuildError, VersionSpecifierParseError,
    },
};

mod error;
mod range_parser;
mod selector;
mod specifier;
mod version;
mod version_specifier;
