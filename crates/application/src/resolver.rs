//! The mod resolver service.
//!
//! Orchestrates the pipeline that turns a mods folder into an ordered,
//! validated load plan: discover and parse manifests, validate each mod,
//! then resolve dependencies into a load order. The stages are chained by
//! the caller so the host can log or filter between them.

use crate::{dependencies, validation};
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use modhost_infrastructure::compatibility_db::CompatibilityDatabase;
use modhost_infrastructure::scanner::ModScanner;
use std::path::Path;
use tracing::{info, instrument};

/// Resolves the mods folder into an ordered, validated load plan
///
/// The resolver is stateless; every call takes its collaborators explicitly
/// and no stage touches the network or mutates files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModResolver;

impl ModResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self
    }

    /// Discover and parse every candidate mod under the mods root
    ///
    /// Each candidate becomes one metadata record: Found with its manifest
    /// and any matching compatibility record, or Failed with the discovery
    /// or parse error. A nonexistent or unreadable root yields an empty
    /// list; this operation never fails in aggregate.
    #[instrument(skip(self, scanner, db), fields(root = %root.display()))]
    pub fn read_manifests(
        &self,
        scanner: &ModScanner,
        root: &Path,
        db: &CompatibilityDatabase,
    ) -> Vec<ModMetadata> {
        let mut records = Vec::new();
        for entry in scanner.scan(root) {
            let record = match entry.manifest {
                Some(manifest) => {
                    let data_record = db
                        .lookup(manifest.unique_id.as_str(), &manifest.version)
                        .cloned();
                    let display_name = if manifest.name.trim().is_empty() {
                        entry.display_name
                    } else {
                        manifest.name.clone()
                    };
                    ModMetadata::found(entry.directory_path, display_name, manifest, data_record)
                }
                None => {
                    let error = entry
                        .error
                        .map(|error| error.to_string())
                        .unwrap_or_else(|| "no manifest found".to_string());
                    ModMetadata::failed(entry.directory_path, entry.display_name, error)
                }
            };
            records.push(record);
        }

        info!(
            found = records.iter().filter(|record| record.is_found()).count(),
            failed = records.iter().filter(|record| record.is_failed()).count(),
            "read mod manifests"
        );
        records
    }

    /// Validate each mod against the host and the compatibility database
    ///
    /// Records are failed in place; records that arrive Failed are skipped
    /// untouched. `get_update_url` maps a mod's unique ID to a download page
    /// when the host knows one, for friendlier diagnostics.
    #[instrument(skip_all, fields(api_version = %api_version, mods = records.len()))]
    pub fn validate_manifests<F>(
        &self,
        records: &mut [ModMetadata],
        api_version: &SemanticVersion,
        get_update_url: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        validation::validate_manifests(records, api_version, get_update_url);
    }

    /// Resolve dependencies and emit the records in load order
    ///
    /// Every input record is returned: records that arrived Failed first (in
    /// their original relative order), then the loadable mods ordered so each
    /// follows its dependencies, then mods that failed dependency resolution.
    #[instrument(skip_all, fields(mods = records.len()))]
    pub fn process_dependencies(
        &self,
        records: Vec<ModMetadata>,
        db: &CompatibilityDatabase,
    ) -> Vec<ModMetadata> {
        dependencies::process_dependencies(records, db)
    }
}
