//! Fluent builders for constructing test metadata records.
//!
//! Most resolver tests need a handful of mods with specific IDs, versions,
//! and dependencies; the builder keeps those scenarios readable without
//! touching the filesystem.

use indexmap::IndexMap;
use modhost_domain::compatibility::ModCompatibilityRecord;
use modhost_domain::identifiers::ModId;
use modhost_domain::manifest::{ContentPackTarget, Manifest, ManifestDependency};
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use std::path::PathBuf;

/// Builder for a test mod's manifest and metadata record
#[derive(Clone)]
pub struct ModBuilder {
    id: String,
    name: Option<String>,
    version: String,
    entry_file: Option<String>,
    content_pack_for: Option<String>,
    minimum_api_version: Option<String>,
    dependencies: Vec<ManifestDependency>,
    directory: Option<PathBuf>,
    data_record: Option<ModCompatibilityRecord>,
}

impl ModBuilder {
    /// A code mod with the given unique ID, version 1.0.0, and a default
    /// entry file
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            version: "1.0.0".to_string(),
            entry_file: Some("Mod.dll".to_string()),
            content_pack_for: None,
            minimum_api_version: None,
            dependencies: Vec::new(),
            directory: None,
            data_record: None,
        }
    }

    /// Override the display name (defaults to the unique ID)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the mod version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the entry file name
    pub fn with_entry_file(mut self, entry_file: impl Into<String>) -> Self {
        self.entry_file = Some(entry_file.into());
        self
    }

    /// Turn the mod into a content pack for the given mod (clears the entry
    /// file)
    pub fn as_content_pack_for(mut self, target_id: impl Into<String>) -> Self {
        self.content_pack_for = Some(target_id.into());
        self.entry_file = None;
        self
    }

    /// Declare a minimum host API version
    pub fn with_minimum_api_version(mut self, version: impl Into<String>) -> Self {
        self.minimum_api_version = Some(version.into());
        self
    }

    /// Declare a required dependency
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(ManifestDependency {
            unique_id: ModId::new(id.into()),
            minimum_version: None,
            required: true,
        });
        self
    }

    /// Declare a required dependency with a minimum version
    pub fn with_dependency_at_least(
        mut self,
        id: impl Into<String>,
        minimum: impl AsRef<str>,
    ) -> Self {
        self.dependencies.push(ManifestDependency {
            unique_id: ModId::new(id.into()),
            minimum_version: Some(parse_version(minimum.as_ref())),
            required: true,
        });
        self
    }

    /// Declare an optional dependency
    pub fn with_optional_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(ManifestDependency {
            unique_id: ModId::new(id.into()),
            minimum_version: None,
            required: false,
        });
        self
    }

    /// Place the mod in a specific folder (defaults to `/mods/<id>`)
    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Attach a compatibility database record
    pub fn with_data_record(mut self, record: ModCompatibilityRecord) -> Self {
        self.data_record = Some(record);
        self
    }

    /// Build just the manifest
    pub fn build_manifest(&self) -> Manifest {
        Manifest {
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            author: String::new(),
            description: String::new(),
            unique_id: ModId::new(self.id.clone()),
            version: parse_version(&self.version),
            entry_file: self.entry_file.clone(),
            content_pack_for: self.content_pack_for.clone().map(|target_id| ContentPackTarget {
                unique_id: ModId::new(target_id),
            }),
            minimum_api_version: self
                .minimum_api_version
                .as_deref()
                .map(parse_version),
            dependencies: self.dependencies.clone(),
            extra_fields: IndexMap::new(),
        }
    }

    /// Build a Found metadata record
    pub fn build(&self) -> ModMetadata {
        let manifest = self.build_manifest();
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("/mods/{}", self.id)));
        let display_name = manifest.name.clone();
        ModMetadata::found(directory, display_name, manifest, self.data_record.clone())
    }
}

/// Build a compatibility record with the given status and optional URL
pub fn data_record(
    id: &str,
    status: modhost_domain::compatibility::CompatibilityStatus,
    alternative_url: Option<&str>,
) -> ModCompatibilityRecord {
    ModCompatibilityRecord {
        id: ModId::new(id),
        name: None,
        status,
        alternative_url: alternative_url.map(str::to_string),
        status_upper_version: None,
    }
}

fn parse_version(raw: &str) -> SemanticVersion {
    SemanticVersion::parse(raw).expect("builder versions must be valid")
}
