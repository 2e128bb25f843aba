//! Discovering candidate mod folders under the mods root.

use crate::manifest_reader::ManifestReader;
use modhost_domain::errors::ManifestError;
use modhost_domain::manifest::Manifest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// How many directory levels below a candidate the scanner searches for a
/// manifest before giving up on it
pub const MAX_SCAN_DEPTH: usize = 4;

/// One candidate mod folder discovered under the mods root
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// The folder that holds (or should hold) the manifest
    pub directory_path: PathBuf,

    /// The folder path relative to the mods root, for diagnostics
    pub display_name: String,

    /// The parsed manifest, when one was found and decoded
    pub manifest: Option<Manifest>,

    /// Why no usable manifest was produced, otherwise
    pub error: Option<ManifestError>,
}

/// Walks the mods root and emits one entry per candidate folder
///
/// Each immediate subdirectory of the root is a candidate. A candidate that
/// directly contains a manifest is final; otherwise its subdirectories are
/// searched down to [`MAX_SCAN_DEPTH`], and every manifest-bearing folder
/// found becomes its own entry. A candidate with no reachable manifest
/// yields a single entry with [`ManifestError::Missing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModScanner {
    reader: ManifestReader,
}

impl ModScanner {
    /// Create a scanner with the given manifest reader
    pub fn new(reader: ManifestReader) -> Self {
        Self { reader }
    }

    /// Scan the mods root
    ///
    /// A nonexistent or unreadable root yields an empty list. Entries are
    /// emitted in lexical directory order so diagnostics are deterministic.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn scan(&self, root: &Path) -> Vec<ScanEntry> {
        let candidates = match sorted_subdirectories(root) {
            Ok(dirs) => dirs,
            Err(err) => {
                warn!(%err, "couldn't read mods root; no mods will be loaded");
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for candidate in candidates {
            if is_ignored(&candidate) {
                debug!(folder = %candidate.display(), "skipped dot-prefixed folder");
                continue;
            }

            match self.find_mod_folders(&candidate, MAX_SCAN_DEPTH) {
                Ok(folders) if folders.is_empty() => {
                    entries.push(self.entry_for(root, &candidate, Err(ManifestError::Missing)));
                }
                Ok(folders) => {
                    for folder in folders {
                        let result = self.reader.read_folder(&folder);
                        entries.push(self.entry_for(root, &folder, result));
                    }
                }
                Err(err) => {
                    entries.push(self.entry_for(
                        root,
                        &candidate,
                        Err(ManifestError::Malformed(format!("couldn't scan folder: {err}"))),
                    ));
                }
            }
        }

        debug!(count = entries.len(), "scanned mods root");
        entries
    }

    /// Find every folder under `dir` (inclusive) that directly contains a
    /// manifest file, searching at most `depth` levels down
    fn find_mod_folders(&self, dir: &Path, depth: usize) -> io::Result<Vec<PathBuf>> {
        if self.reader.locate(dir)?.is_some() {
            return Ok(vec![dir.to_path_buf()]);
        }
        if depth == 0 {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for child in sorted_subdirectories(dir)? {
            if is_ignored(&child) {
                continue;
            }
            found.extend(self.find_mod_folders(&child, depth - 1)?);
        }
        Ok(found)
    }

    fn entry_for(
        &self,
        root: &Path,
        folder: &Path,
        result: Result<Manifest, ManifestError>,
    ) -> ScanEntry {
        let display_name = folder
            .strip_prefix(root)
            .unwrap_or(folder)
            .to_string_lossy()
            .into_owned();
        match result {
            Ok(manifest) => ScanEntry {
                directory_path: folder.to_path_buf(),
                display_name,
                manifest: Some(manifest),
                error: None,
            },
            Err(error) => ScanEntry {
                directory_path: folder.to_path_buf(),
                display_name,
                manifest: None,
                error: Some(error),
            },
        }
    }
}

/// The immediate subdirectories of `dir`, sorted by path
fn sorted_subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Dot-prefixed folders are not mod candidates
fn is_ignored(dir: &Path) -> bool {
    dir.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
