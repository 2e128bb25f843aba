//! Testing utilities for the modhost resolver
//!
//! This crate provides:
//! - Fluent builders for manifests and metadata records
//! - On-disk mod-folder fixtures for scanner and pipeline tests
//! - Tracing setup for tests
//!
//! # Examples
//!
//! ```
//! use modhost_testing::builders::ModBuilder;
//!
//! let record = ModBuilder::new("Example.Mod")
//!     .with_version("1.2.0")
//!     .with_dependency("Base.Mod")
//!     .build();
//! assert!(record.is_found());
//! ```

pub mod builders;
pub mod fixtures;
pub mod logging;

// Re-export commonly used helpers
pub use builders::{data_record, ModBuilder};
pub use fixtures::{
    content_pack_json, manifest_json, mods_root, write_empty_folder, write_mod_folder,
};
pub use logging::init_test_logging;

// Re-export testing dependencies for convenience
pub use tempfile;
