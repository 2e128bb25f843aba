//! Modhost infrastructure layer
//!
//! Filesystem-facing adapters for the resolver:
//!
//! - `manifest_reader` - locates and decodes a mod folder's manifest file
//! - `scanner` - walks the mods root and emits candidate folders
//! - `compatibility_db` - the bundled database of known-problematic mods
//!
//! All I/O the resolver performs lives here; the domain layer stays pure and
//! the application layer only orchestrates.

pub mod compatibility_db;
pub mod manifest_reader;
pub mod scanner;

pub use compatibility_db::CompatibilityDatabase;
pub use manifest_reader::{ManifestReader, MANIFEST_FILE_NAME};
pub use scanner::{ModScanner, ScanEntry, MAX_SCAN_DEPTH};
