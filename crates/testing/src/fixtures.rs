//! On-disk fixtures for scanner and pipeline tests.
//!
//! The resolver's discovery stage and entry-file check read the filesystem,
//! so their tests work against real temporary directories.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary mods root
pub fn mods_root() -> Result<TempDir> {
    tempfile::tempdir().context("couldn't create temporary mods root")
}

/// A minimal valid manifest document for a code mod
pub fn manifest_json(id: &str, version: &str) -> Value {
    json!({
        "Name": id,
        "Author": "tester",
        "Version": version,
        "UniqueID": id,
        "EntryFile": "Mod.dll",
    })
}

/// A minimal valid manifest document for a content pack
pub fn content_pack_json(id: &str, version: &str, target_id: &str) -> Value {
    json!({
        "Name": id,
        "Version": version,
        "UniqueID": id,
        "ContentPackFor": { "UniqueID": target_id },
    })
}

/// Write a mod folder with the given manifest document
///
/// If the document names an `EntryFile`, an empty file with that name is
/// created too so the entry-file check passes. Returns the folder path.
pub fn write_mod_folder(root: &Path, folder: &str, manifest: &Value) -> Result<PathBuf> {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).with_context(|| format!("couldn't create mod folder {folder}"))?;
    fs::write(
        dir.join("manifest.json"),
        serde_json::to_string_pretty(manifest)?,
    )
    .context("couldn't write manifest")?;

    if let Some(entry_file) = entry_file_name(manifest) {
        fs::write(dir.join(entry_file), b"").context("couldn't write entry file")?;
    }
    Ok(dir)
}

/// Write a folder with no manifest at all
pub fn write_empty_folder(root: &Path, folder: &str) -> Result<PathBuf> {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).with_context(|| format!("couldn't create folder {folder}"))?;
    Ok(dir)
}

fn entry_file_name(manifest: &Value) -> Option<&str> {
    let fields = manifest.as_object()?;
    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("entryfile"))
        .and_then(|(_, value)| value.as_str())
        .filter(|name| !name.trim().is_empty())
}
