//! Compatibility override records.
//!
//! The host bundles a database of mods known to misbehave; each record keys
//! on a mod's unique ID with an optional version range and tells the
//! resolver how to treat matching versions.

use crate::identifiers::ModId;
use crate::version::SemanticVersion;
use serde::{Deserialize, Serialize};

/// How the host should treat a mod matched by a compatibility record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    /// No known issues; load normally
    AssumedOk,

    /// Known broken on the current host; don't load
    AssumeBroken,

    /// Superseded or abandoned; don't load
    Obsolete,
}

impl CompatibilityStatus {
    /// Whether this status prevents the mod from loading
    pub fn blocks_loading(&self) -> bool {
        matches!(self, Self::AssumeBroken | Self::Obsolete)
    }

    /// Human-readable status name used in diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AssumedOk => "assumed ok",
            Self::AssumeBroken => "assumed broken",
            Self::Obsolete => "obsolete",
        }
    }
}

/// A compatibility override for one mod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModCompatibilityRecord {
    /// The unique ID the record applies to
    pub id: ModId,

    /// A friendly display name for diagnostics, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// How matching versions should be treated
    pub status: CompatibilityStatus,

    /// Where to find a working replacement, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_url: Option<String>,

    /// The newest mod version the record applies to (inclusive); no bound
    /// means every version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_upper_version: Option<SemanticVersion>,
}

impl ModCompatibilityRecord {
    /// Whether this record's version range contains `version`
    pub fn applies_to(&self, version: &SemanticVersion) -> bool {
        match &self.status_upper_version {
            Some(upper) => upper.is_at_least(version),
            None => true,
        }
    }
}
