//! Modhost domain types
//!
//! This crate provides the core domain model for the modhost resolver: the
//! value types the pipeline passes between its stages, with no I/O of their
//! own.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: case-insensitive mod IDs with source casing preserved
//! - **version**: semantic versioning with prerelease ordering
//! - **manifest**: the mod manifest model and its document field walk
//! - **compatibility**: compatibility override records bundled by the host
//! - **metadata**: the per-mod mutable record the pipeline operates on
//! - **errors**: manifest discovery/parse error kinds
//!
//! ## Usage
//!
//! ```rust
//! use modhost_domain::{identifiers::ModId, version::SemanticVersion};
//!
//! let id = ModId::new("Example.Mod");
//! assert!(id.matches("example.mod"));
//!
//! let version = SemanticVersion::parse("1.2-beta").unwrap();
//! assert!(version.is_prerelease());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core domain modules
pub mod compatibility;
pub mod errors;
pub mod identifiers;
pub mod manifest;
pub mod metadata;
pub mod version;

// Re-export commonly used types
pub use compatibility::{CompatibilityStatus, ModCompatibilityRecord};
pub use errors::ManifestError;
pub use identifiers::ModId;
pub use manifest::{ContentPackTarget, Manifest, ManifestDependency, ManifestKind};
pub use metadata::{MetadataStatus, ModMetadata};
pub use version::{SemanticVersion, VersionParseError};
