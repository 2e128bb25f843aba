//! Semantic versioning for mods and the host API.
//!
//! Mod manifests declare their own version, an optional minimum host API
//! version, and optional minimum versions for their dependencies. All of them
//! use the same dotted format with an optional prerelease tag.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Error type for version parsing failures
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum VersionParseError {
    /// The string doesn't match `MAJOR.MINOR[.PATCH][-PRERELEASE]`
    #[error("invalid version format: {input:?}")]
    InvalidFormat {
        /// The offending input string
        input: String,
    },

    /// A numeric component is missing or not a non-negative integer
    #[error("invalid {component} component in version {input:?}")]
    InvalidComponent {
        /// Which component failed to parse
        component: &'static str,
        /// The offending input string
        input: String,
    },

    /// The prerelease tag is empty or contains non-printable or whitespace characters
    #[error("invalid prerelease tag in version {input:?}")]
    InvalidPrerelease {
        /// The offending input string
        input: String,
    },
}

/// A mod or host API version in `MAJOR.MINOR[.PATCH][-PRERELEASE]` form.
///
/// Ordering is numeric component-wise; a version with a prerelease tag sorts
/// below the same numeric version without one, and two prerelease tags
/// compare by ASCII ignoring capitalization. Equality ignores capitalization
/// in the prerelease tag too, so `1.0-Beta` and `1.0-beta` are the same
/// version (displayed with whichever casing they were parsed from).
///
/// # Example
/// ```
/// # use modhost_domain::version::SemanticVersion;
/// let version = SemanticVersion::parse("1.2-beta.3").unwrap();
/// assert_eq!(version.major, 1);
/// assert_eq!(version.minor, 2);
/// assert_eq!(version.patch, 0);
/// assert_eq!(version.prerelease.as_deref(), Some("beta.3"));
/// assert!(SemanticVersion::new(1, 2, 0).is_at_least(&version));
/// ```
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    /// Major version number
    pub major: u32,

    /// Minor version number
    pub minor: u32,

    /// Patch version number (0 when omitted from the source string)
    pub patch: u32,

    /// Optional prerelease tag in its source casing
    pub prerelease: Option<String>,
}

impl SemanticVersion {
    /// Create a release version with major, minor, and patch numbers
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Create a version with a prerelease tag
    ///
    /// # Example
    /// ```
    /// # use modhost_domain::version::SemanticVersion;
    /// let version = SemanticVersion::with_prerelease(1, 0, 0, "alpha");
    /// assert_eq!(version.to_string(), "1.0.0-alpha");
    /// ```
    pub fn with_prerelease(major: u32, minor: u32, patch: u32, prerelease: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Some(prerelease.into()),
        }
    }

    /// Parse a version string
    ///
    /// Accepts `MAJOR.MINOR`, `MAJOR.MINOR.PATCH`, and either form followed
    /// by `-PRERELEASE`, where the tag is everything after the first `-` and
    /// must be printable ASCII without whitespace. A missing patch defaults
    /// to 0.
    ///
    /// # Example
    /// ```
    /// # use modhost_domain::version::SemanticVersion;
    /// assert_eq!(
    ///     SemanticVersion::parse("2.10").unwrap(),
    ///     SemanticVersion::new(2, 10, 0),
    /// );
    /// assert!(SemanticVersion::parse("2.10.x").is_err());
    /// ```
    pub fn parse(version_str: &str) -> Result<Self, VersionParseError> {
        let raw = version_str.trim();
        if raw.is_empty() {
            return Err(VersionParseError::InvalidFormat {
                input: version_str.to_string(),
            });
        }

        // The tag starts at the first '-', even if it contains more dashes.
        let (core, prerelease) = match raw.split_once('-') {
            Some((core, tag)) => (core, Some(tag)),
            None => (raw, None),
        };

        if let Some(tag) = prerelease {
            let printable = tag.bytes().all(|b| b.is_ascii_graphic());
            if tag.is_empty() || !printable {
                return Err(VersionParseError::InvalidPrerelease {
                    input: version_str.to_string(),
                });
            }
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(VersionParseError::InvalidFormat {
                input: version_str.to_string(),
            });
        }

        let major = Self::parse_component(parts[0], "major", version_str)?;
        let minor = Self::parse_component(parts[1], "minor", version_str)?;
        let patch = match parts.get(2) {
            Some(part) => Self::parse_component(part, "patch", version_str)?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            patch,
            prerelease: prerelease.map(str::to_string),
        })
    }

    fn parse_component(
        part: &str,
        component: &'static str,
        input: &str,
    ) -> Result<u32, VersionParseError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionParseError::InvalidComponent {
                component,
                input: input.to_string(),
            });
        }
        part.parse::<u32>()
            .map_err(|_| VersionParseError::InvalidComponent {
                component,
                input: input.to_string(),
            })
    }

    /// Whether this version is at least `other` (i.e. not strictly older)
    ///
    /// # Example
    /// ```
    /// # use modhost_domain::version::SemanticVersion;
    /// let release = SemanticVersion::new(1, 1, 0);
    /// let beta = SemanticVersion::with_prerelease(1, 1, 0, "beta");
    /// assert!(release.is_at_least(&beta));
    /// assert!(!beta.is_at_least(&release));
    /// ```
    pub fn is_at_least(&self, other: &Self) -> bool {
        *self >= *other
    }

    /// Whether this version carries a prerelease tag
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    fn prerelease_bytes(&self) -> Option<impl Iterator<Item = u8> + '_> {
        self.prerelease
            .as_deref()
            .map(|tag| tag.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease
            .as_deref()
            .map(str::to_ascii_lowercase)
            .hash(state);
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => match self.minor.cmp(&other.minor) {
                Ordering::Equal => match self.patch.cmp(&other.patch) {
                    Ordering::Equal => {
                        // A prerelease sorts below the release it precedes.
                        match (self.prerelease_bytes(), other.prerelease_bytes()) {
                            (None, None) => Ordering::Equal,
                            (Some(_), None) => Ordering::Less,
                            (None, Some(_)) => Ordering::Greater,
                            (Some(a), Some(b)) => a.cmp(b),
                        }
                    }
                    other => other,
                },
                other => other,
            },
            other => other,
        }
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref tag) = self.prerelease {
            write!(f, "-{}", tag)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));

        let v = SemanticVersion::parse("1.2.3-beta.2").unwrap();
        assert_eq!(v.prerelease.as_deref(), Some("beta.2"));
    }

    #[test]
    fn test_parse_defaults_patch() {
        let v = SemanticVersion::parse("1.2").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 0));

        let v = SemanticVersion::parse("1.2-rc1").unwrap();
        assert_eq!(v, SemanticVersion::with_prerelease(1, 2, 0, "rc1"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SemanticVersion::parse("").is_err());
        assert!(SemanticVersion::parse("1").is_err());
        assert!(SemanticVersion::parse("1.2.3.4").is_err());
        assert!(SemanticVersion::parse("a.b.c").is_err());
        assert!(SemanticVersion::parse("1.-2").is_err());
        assert!(SemanticVersion::parse("1.2-").is_err());
        assert!(SemanticVersion::parse("1.2-beta tag").is_err());
    }

    #[test]
    fn test_parse_error_carries_input() {
        let err = SemanticVersion::parse("not-a-version").unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["1.2.3", "0.1.0", "1.2.3-beta.2"] {
            let v = SemanticVersion::parse(raw).unwrap();
            assert_eq!(v.to_string(), raw);
        }
        assert_eq!(SemanticVersion::parse("1.2").unwrap().to_string(), "1.2.0");
    }

    #[test]
    fn test_ordering() {
        let v1 = SemanticVersion::new(1, 0, 0);
        let v2 = SemanticVersion::new(1, 1, 0);
        let v3 = SemanticVersion::new(2, 0, 0);
        assert!(v1 < v2);
        assert!(v2 < v3);

        let stable = SemanticVersion::new(1, 0, 0);
        let pre = SemanticVersion::with_prerelease(1, 0, 0, "alpha");
        assert!(pre < stable);
        assert!(stable.is_at_least(&pre));
        assert!(!pre.is_at_least(&stable));

        let alpha = SemanticVersion::with_prerelease(1, 0, 0, "alpha");
        let beta = SemanticVersion::with_prerelease(1, 0, 0, "beta");
        assert!(alpha < beta);
    }

    #[test]
    fn test_prerelease_equality_ignores_case() {
        let a = SemanticVersion::parse("1.0-Beta").unwrap();
        let b = SemanticVersion::parse("1.0-beta").unwrap();
        assert_eq!(a, b);
        assert!(a.is_at_least(&b) && b.is_at_least(&a));
    }

    #[test]
    fn test_serde_string_form() {
        let v: SemanticVersion = serde_json::from_str("\"1.2.3-beta\"").unwrap();
        assert_eq!(v, SemanticVersion::with_prerelease(1, 2, 3, "beta"));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.2.3-beta\"");
        assert!(serde_json::from_str::<SemanticVersion>("\"oops\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
            let v = SemanticVersion::new(major, minor, patch);
            let parsed = SemanticVersion::parse(&v.to_string()).unwrap();
            prop_assert_eq!(parsed, v);
        }

        #[test]
        fn prop_round_trip_prerelease(
            major in 0u32..100,
            minor in 0u32..100,
            patch in 0u32..100,
            tag in "[a-zA-Z0-9.]{1,12}",
        ) {
            let v = SemanticVersion::with_prerelease(major, minor, patch, tag);
            let parsed = SemanticVersion::parse(&v.to_string()).unwrap();
            prop_assert_eq!(parsed, v);
        }

        #[test]
        fn prop_comparison_is_total(
            a in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
            b in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
        ) {
            let a = SemanticVersion::parse(&a).unwrap();
            let b = SemanticVersion::parse(&b).unwrap();
            prop_assert!(a.is_at_least(&b) || b.is_at_least(&a));
            prop_assert_eq!(a.is_at_least(&b) && b.is_at_least(&a), a == b);
        }
    }
}
