//! The mod manifest model.
//!
//! A manifest is the declaration document that introduces a mod: its display
//! metadata, unique ID, version, entry file (or the mod it's a content pack
//! for), and its dependencies. Documents are decoded with a single pass over
//! the top-level keys; recognized keys are matched case-insensitively and
//! everything else is preserved verbatim in [`Manifest::extra_fields`] so
//! later tooling can read custom fields with their source types intact.

use crate::errors::ManifestError;
use crate::identifiers::ModId;
use crate::version::SemanticVersion;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A dependency declared in a manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDependency {
    /// The unique ID of the mod depended on
    pub unique_id: ModId,

    /// The minimum acceptable version of that mod, if any
    pub minimum_version: Option<SemanticVersion>,

    /// Whether the dependency must be present (defaults to true)
    pub required: bool,
}

/// The mod a content pack provides content for
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPackTarget {
    /// The unique ID of the consuming mod
    pub unique_id: ModId,
}

/// What kind of mod a manifest declares
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManifestKind<'a> {
    /// A mod with executable code and an entry file to load
    CodeMod {
        /// The entry file name relative to the mod folder
        entry_file: &'a str,
    },

    /// A content pack: no executable entry, targets another mod by ID
    ContentPack {
        /// The unique ID of the mod the pack targets
        target_id: &'a ModId,
    },
}

/// A parsed mod manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// The mod's display name
    pub name: String,

    /// The mod's author (empty when not declared)
    pub author: String,

    /// A short description (empty when not declared)
    pub description: String,

    /// The mod's unique ID
    pub unique_id: ModId,

    /// The mod's own version
    pub version: SemanticVersion,

    /// The entry file to load, for code mods
    pub entry_file: Option<String>,

    /// The mod this manifest provides a content pack for, if any
    pub content_pack_for: Option<ContentPackTarget>,

    /// The minimum host API version the mod needs, if declared
    pub minimum_api_version: Option<SemanticVersion>,

    /// Declared dependencies
    pub dependencies: Vec<ManifestDependency>,

    /// Top-level document keys not consumed by a recognized field, verbatim
    pub extra_fields: IndexMap<String, Value>,
}

impl Manifest {
    /// Decode a manifest from a parsed JSON document
    ///
    /// Recognized top-level keys (`Name`, `Author`, `Description`, `UniqueID`,
    /// `Version`, `EntryFile`, `MinimumApiVersion`, `Dependencies`,
    /// `ContentPackFor`) are matched case-insensitively. `Name`, `UniqueID`,
    /// and `Version` are required, as is `EntryFile` unless `ContentPackFor`
    /// is present.
    pub fn from_document(document: &Map<String, Value>) -> Result<Self, ManifestError> {
        let mut name = String::new();
        let mut author = String::new();
        let mut description = String::new();
        let mut unique_id = String::new();
        let mut version = None;
        let mut entry_file = None;
        let mut minimum_api_version = None;
        let mut dependencies = Vec::new();
        let mut content_pack_for = None;
        let mut extra_fields = IndexMap::new();

        for (key, value) in document {
            match key.to_ascii_lowercase().as_str() {
                "name" => name = string_value(value, "Name")?,
                "author" => author = string_value(value, "Author")?,
                "description" => description = string_value(value, "Description")?,
                "uniqueid" => unique_id = string_value(value, "UniqueID")?,
                "version" => version = version_value(value, "Version")?,
                "entryfile" => entry_file = Some(string_value(value, "EntryFile")?),
                "minimumapiversion" => {
                    minimum_api_version = version_value(value, "MinimumApiVersion")?
                }
                "dependencies" => dependencies = parse_dependencies(value)?,
                "contentpackfor" => content_pack_for = Some(parse_content_pack_for(value)?),
                _ => {
                    extra_fields.insert(key.clone(), value.clone());
                }
            }
        }

        if name.trim().is_empty() {
            return Err(ManifestError::Incomplete { field: "Name" });
        }
        if unique_id.trim().is_empty() {
            return Err(ManifestError::Incomplete { field: "UniqueID" });
        }
        let version = version.ok_or(ManifestError::Incomplete { field: "Version" })?;

        let entry_file = entry_file.filter(|file| !file.trim().is_empty());
        if entry_file.is_none() && content_pack_for.is_none() {
            return Err(ManifestError::Incomplete { field: "EntryFile" });
        }

        Ok(Self {
            name,
            author,
            description,
            unique_id: ModId::new(unique_id),
            version,
            entry_file,
            content_pack_for,
            minimum_api_version,
            dependencies,
            extra_fields,
        })
    }

    /// Whether this manifest declares a content pack or a code mod
    ///
    /// A manifest with `ContentPackFor` set is a content pack even if it also
    /// names an entry file; the validator rejects that combination.
    pub fn kind(&self) -> ManifestKind<'_> {
        match &self.content_pack_for {
            Some(target) => ManifestKind::ContentPack {
                target_id: &target.unique_id,
            },
            None => ManifestKind::CodeMod {
                entry_file: self.entry_file.as_deref().unwrap_or_default(),
            },
        }
    }

    /// Whether this manifest declares a content pack
    pub fn is_content_pack(&self) -> bool {
        self.content_pack_for.is_some()
    }
}

/// Read a string-valued field; null counts as absent
fn string_value(value: &Value, field: &'static str) -> Result<String, ManifestError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(ManifestError::Malformed(format!(
            "the {field} field must be a string"
        ))),
    }
}

/// Read a version-valued field; null or an empty string counts as absent
fn version_value(
    value: &Value,
    field: &'static str,
) -> Result<Option<SemanticVersion>, ManifestError> {
    let raw = string_value(value, field)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    SemanticVersion::parse(&raw)
        .map(Some)
        .map_err(|source| ManifestError::BadVersion { field, source })
}

fn parse_dependencies(value: &Value) -> Result<Vec<ManifestDependency>, ManifestError> {
    let entries = value.as_array().ok_or_else(|| {
        ManifestError::Malformed("the Dependencies field must be an array".to_string())
    })?;

    let mut dependencies = Vec::with_capacity(entries.len());
    for entry in entries {
        let fields = entry.as_object().ok_or_else(|| {
            ManifestError::Malformed("each Dependencies entry must be an object".to_string())
        })?;

        let mut unique_id = String::new();
        let mut minimum_version = None;
        let mut required = true;
        for (key, value) in fields {
            match key.to_ascii_lowercase().as_str() {
                "uniqueid" => unique_id = string_value(value, "Dependencies")?,
                "minimumversion" => minimum_version = version_value(value, "Dependencies")?,
                "required" => {
                    required = value.as_bool().ok_or_else(|| {
                        ManifestError::Malformed(
                            "the Required flag on a dependency must be a boolean".to_string(),
                        )
                    })?
                }
                _ => {}
            }
        }

        if unique_id.trim().is_empty() {
            return Err(ManifestError::Malformed(
                "each Dependencies entry must specify a UniqueID".to_string(),
            ));
        }

        dependencies.push(ManifestDependency {
            unique_id: ModId::new(unique_id),
            minimum_version,
            required,
        });
    }
    Ok(dependencies)
}

fn parse_content_pack_for(value: &Value) -> Result<ContentPackTarget, ManifestError> {
    let fields = value.as_object().ok_or_else(|| {
        ManifestError::Malformed("the ContentPackFor field must be an object".to_string())
    })?;

    let mut unique_id = String::new();
    for (key, value) in fields {
        if key.eq_ignore_ascii_case("uniqueid") {
            unique_id = string_value(value, "ContentPackFor")?;
        }
    }

    if unique_id.trim().is_empty() {
        return Err(ManifestError::Malformed(
            "the ContentPackFor field must specify a UniqueID".to_string(),
        ));
    }

    Ok(ContentPackTarget {
        unique_id: ModId::new(unique_id),
    })
}
