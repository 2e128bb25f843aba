//! Reading manifest documents from mod folders.

use modhost_domain::errors::ManifestError;
use modhost_domain::manifest::Manifest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The manifest file name, matched case-insensitively
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Reads and decodes one manifest document per mod folder
///
/// The reader touches nothing but the manifest file itself; walking the mods
/// root is the scanner's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestReader;

impl ManifestReader {
    /// Create a manifest reader
    pub fn new() -> Self {
        Self
    }

    /// Find the manifest file directly inside `dir`, if present
    pub fn locate(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().eq_ignore_ascii_case(MANIFEST_FILE_NAME)
                && entry.file_type()?.is_file()
            {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    /// Read and decode the manifest in `dir`
    pub fn read_folder(&self, dir: &Path) -> Result<Manifest, ManifestError> {
        let path = self
            .locate(dir)
            .map_err(|err| ManifestError::Malformed(format!("couldn't scan folder: {err}")))?
            .ok_or(ManifestError::Missing)?;

        let raw = fs::read_to_string(&path)
            .map_err(|err| ManifestError::Malformed(format!("couldn't read manifest file: {err}")))?;

        let document: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| ManifestError::Malformed(format!("invalid JSON: {err}")))?;
        let document = document.as_object().ok_or_else(|| {
            ManifestError::Malformed("the manifest must be a JSON object".to_string())
        })?;

        Manifest::from_document(document)
    }
}
