//! Per-mod metadata records.
//!
//! A [`ModMetadata`] is the one mutable object the resolver pipeline works
//! on. It wraps a discovered folder with its parse result, picks up a
//! compatibility record during discovery, collects failure state during
//! validation and dependency processing, and is finally handed to the caller
//! in load order.

use crate::compatibility::ModCompatibilityRecord;
use crate::identifiers::ModId;
use crate::manifest::Manifest;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether a mod survived the pipeline so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStatus {
    /// Discovered and still loadable
    Found,

    /// Rejected by some stage; `error` says why
    Failed,
}

/// The resolver's per-mod mutable state
///
/// Status only ever moves `Found` → `Failed`; the first failure message
/// sticks and later ones are dropped (logged at debug level).
#[derive(Debug, Clone)]
pub struct ModMetadata {
    directory_path: PathBuf,
    display_name: String,
    manifest: Option<Manifest>,
    data_record: Option<ModCompatibilityRecord>,
    status: MetadataStatus,
    error: Option<String>,
    resolved_dependencies: Vec<ModId>,
    update_key: Option<String>,
}

impl ModMetadata {
    /// Create a record for a mod whose manifest parsed successfully
    pub fn found(
        directory_path: impl Into<PathBuf>,
        display_name: impl Into<String>,
        manifest: Manifest,
        data_record: Option<ModCompatibilityRecord>,
    ) -> Self {
        Self {
            directory_path: directory_path.into(),
            display_name: display_name.into(),
            manifest: Some(manifest),
            data_record,
            status: MetadataStatus::Found,
            error: None,
            resolved_dependencies: Vec::new(),
            update_key: None,
        }
    }

    /// Create a record for a folder that failed discovery or parsing
    pub fn failed(
        directory_path: impl Into<PathBuf>,
        display_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            directory_path: directory_path.into(),
            display_name: display_name.into(),
            manifest: None,
            data_record: None,
            status: MetadataStatus::Failed,
            error: Some(error.into()),
            resolved_dependencies: Vec::new(),
            update_key: None,
        }
    }

    /// The mod folder on disk
    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    /// The name shown in diagnostics (manifest name, or folder name when
    /// parsing failed)
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The parsed manifest, when parsing succeeded
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// The matching compatibility record, if any
    pub fn data_record(&self) -> Option<&ModCompatibilityRecord> {
        self.data_record.as_ref()
    }

    /// The record's current status
    pub fn status(&self) -> MetadataStatus {
        self.status
    }

    /// Whether the record is still loadable
    pub fn is_found(&self) -> bool {
        self.status == MetadataStatus::Found
    }

    /// Whether the record has been rejected
    pub fn is_failed(&self) -> bool {
        self.status == MetadataStatus::Failed
    }

    /// The failure message, when the record has failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Unique IDs of the record's resolved dependencies, in declaration order
    pub fn resolved_dependencies(&self) -> &[ModId] {
        &self.resolved_dependencies
    }

    /// The last-set update key, if any
    pub fn update_key(&self) -> Option<&str> {
        self.update_key.as_deref()
    }

    /// Mark the record failed with the given message
    ///
    /// The first failure wins; once failed, later messages are dropped.
    pub fn set_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.status == MetadataStatus::Failed {
            debug!(
                mod_name = %self.display_name,
                existing = self.error.as_deref().unwrap_or_default(),
                dropped = %message,
                "ignored failure message for already-failed mod"
            );
            return;
        }
        self.status = MetadataStatus::Failed;
        self.error = Some(message);
    }

    /// Case-insensitive match against the manifest's unique ID
    ///
    /// Always false when the manifest failed to parse.
    pub fn has_id(&self, id: &str) -> bool {
        match &self.manifest {
            Some(manifest) => manifest.unique_id.matches(id),
            None => false,
        }
    }

    /// Remember which key was used to look up an update URL for this mod
    pub fn set_update_key(&mut self, key: impl Into<String>) {
        self.update_key = Some(key.into());
    }

    /// Replace the record's resolved dependency list
    pub fn set_resolved_dependencies(&mut self, dependencies: Vec<ModId>) {
        self.resolved_dependencies = dependencies;
    }

    /// Drop the resolved dependency list (used when the record fails after
    /// resolution, so emitted lists only name loadable mods)
    pub fn clear_resolved_dependencies(&mut self) {
        self.resolved_dependencies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::SemanticVersion;
    use serde_json::json;

    fn test_manifest(id: &str) -> Manifest {
        let doc = json!({
            "Name": format!("{id} (name)"),
            "UniqueID": id,
            "Version": "1.0.0",
            "EntryFile": "Mod.dll",
        });
        Manifest::from_document(doc.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_found_record_has_no_error() {
        let record = ModMetadata::found("/mods/Example", "Example", test_manifest("Example.Mod"), None);
        assert!(record.is_found());
        assert_eq!(record.error(), None);
        assert_eq!(
            record.manifest().unwrap().version,
            SemanticVersion::new(1, 0, 0),
        );
    }

    #[test]
    fn test_failed_record_carries_error() {
        let record = ModMetadata::failed("/mods/Empty", "Empty", "no manifest found");
        assert!(record.is_failed());
        assert_eq!(record.error(), Some("no manifest found"));
        assert!(record.manifest().is_none());
    }

    #[test]
    fn test_first_failure_wins() {
        let mut record =
            ModMetadata::found("/mods/Example", "Example", test_manifest("Example.Mod"), None);
        record.set_failed("first problem");
        record.set_failed("second problem");
        assert!(record.is_failed());
        assert_eq!(record.error(), Some("first problem"));
    }

    #[test]
    fn test_has_id_is_case_insensitive() {
        let record =
            ModMetadata::found("/mods/Example", "Example", test_manifest("Example.Mod"), None);
        assert!(record.has_id("example.mod"));
        assert!(!record.has_id("other.mod"));

        let failed = ModMetadata::failed("/mods/Empty", "Empty", "no manifest found");
        assert!(!failed.has_id("example.mod"));
    }
}
