//! Error types for manifest discovery and parsing.

use crate::version::VersionParseError;

/// Why a candidate folder failed to yield a usable manifest
///
/// The variant is the error kind; its `Display` rendering is the message
/// stored on the failed metadata record.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
    /// The folder contains no recognized manifest file
    #[error("no manifest found")]
    Missing,

    /// The manifest file exists but doesn't decode as a mapping of string keys
    #[error("manifest is malformed: {0}")]
    Malformed(String),

    /// A required manifest field is missing or empty
    #[error("manifest is missing required field {field}")]
    Incomplete {
        /// The canonical name of the missing field
        field: &'static str,
    },

    /// A version-valued field failed to parse
    #[error("manifest has an invalid {field} value: {source}")]
    BadVersion {
        /// The canonical name of the unparseable field
        field: &'static str,
        /// The underlying version parse failure
        source: VersionParseError,
    },
}
