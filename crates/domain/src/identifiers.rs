//! Strongly-typed mod identifiers.
//!
//! A mod's unique ID is its primary key across the resolver: dependency
//! references, compatibility records, and duplicate detection all match on
//! it. IDs compare case-insensitively but always display in the casing the
//! mod author wrote.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

static WELL_FORMED_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("static pattern is valid"));

/// A mod's unique ID, compared case-insensitively
///
/// # Example
/// ```
/// # use modhost_domain::identifiers::ModId;
/// let id = ModId::new("Pathoschild.ContentPatcher");
/// assert_eq!(id, ModId::new("pathoschild.contentpatcher"));
/// assert_eq!(id.to_string(), "Pathoschild.ContentPatcher");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModId(String);

impl ModId {
    /// Create an ID, preserving the source casing
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The ID in its source casing
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercased form used for comparison and map keys
    pub fn comparable(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive match against a raw ID string
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    /// Whether the ID only uses letters, digits, dots, underscores, and dashes
    ///
    /// Other characters are tolerated but make the ID fragile as a lookup key
    /// across tools, so the validator warns about them.
    pub fn is_well_formed(&self) -> bool {
        WELL_FORMED_ID.is_match(&self.0)
    }
}

impl PartialEq for ModId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ModId {}

impl Hash for ModId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparable().hash(state);
    }
}

impl Ord for ModId {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = self
            .0
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()));
        // Fall back to the raw bytes so equal-ignoring-case IDs still order
        // deterministically for diagnostics.
        match ordering {
            Ordering::Equal => self.0.cmp(&other.0),
            other => other,
        }
    }
}

impl PartialOrd for ModId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ModId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
