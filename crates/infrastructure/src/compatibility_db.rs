//! The bundled mod compatibility database.

use modhost_domain::compatibility::ModCompatibilityRecord;
use modhost_domain::version::SemanticVersion;
use serde::{Deserialize, Serialize};

/// Known-problematic mods shipped with the host
///
/// Loaded once and held immutable; lookups are case-insensitive on the mod's
/// unique ID and inclusive on version ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatibilityDatabase {
    #[serde(default)]
    mods: Vec<ModCompatibilityRecord>,
}

impl CompatibilityDatabase {
    /// A database with no records
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a database from its JSON document
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Build a database from records directly
    pub fn from_records(mods: Vec<ModCompatibilityRecord>) -> Self {
        Self { mods }
    }

    /// The database bundled with the host
    pub fn bundled() -> Self {
        Self::from_json(include_str!("../data/compatibility.json"))
            .expect("bundled compatibility database is valid")
    }

    /// The record applying to the given mod ID and version, if any
    pub fn lookup(&self, id: &str, version: &SemanticVersion) -> Option<&ModCompatibilityRecord> {
        self.mods
            .iter()
            .find(|record| record.id.matches(id) && record.applies_to(version))
    }

    /// The friendly display name recorded for a mod ID, if any
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.mods
            .iter()
            .find(|record| record.id.matches(id))
            .and_then(|record| record.name.as_deref())
    }

    /// How many records the database holds
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// Whether the database holds no records
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}
