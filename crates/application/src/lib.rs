//! Modhost application layer
//!
//! This crate orchestrates the resolver pipeline over the domain and
//! infrastructure layers.
//!
//! ## Modules
//!
//! - `resolver` - the `ModResolver` service the host calls
//! - `validation` - per-mod validation rules
//! - `dependencies` - dependency resolution, cycle handling, load ordering
//!
//! ## Usage
//!
//! ```no_run
//! use modhost_application::ModResolver;
//! use modhost_domain::version::SemanticVersion;
//! use modhost_infrastructure::{CompatibilityDatabase, ManifestReader, ModScanner};
//! use std::path::Path;
//!
//! let resolver = ModResolver::new();
//! let scanner = ModScanner::new(ManifestReader::new());
//! let db = CompatibilityDatabase::bundled();
//! let api_version = SemanticVersion::new(4, 0, 0);
//!
//! let mut mods = resolver.read_manifests(&scanner, Path::new("/game/Mods"), &db);
//! resolver.validate_manifests(&mut mods, &api_version, |_id| None);
//! let load_order = resolver.process_dependencies(mods, &db);
//!
//! for record in &load_order {
//!     match record.error() {
//!         None => println!("loading {}", record.display_name()),
//!         Some(error) => println!("skipped {}: {error}", record.display_name()),
//!     }
//! }
//! ```

mod dependencies;
mod resolver;
mod validation;

pub use resolver::ModResolver;
