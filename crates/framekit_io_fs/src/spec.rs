//! Manifest copy specification models and top-level error types.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::conf::{C_FIELD_ID_DEFAULT, C_FIELD_PATHS_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Existing destination file conflict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumManifestFileConflictStrategy {
    /// Keep destination file and count the entry as already copied.
    Skip,
    /// Replace destination file with source file.
    Overwrite,
    /// Keep destination file only when its SHA-256 digest matches the source.
    VerifyDigest,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_manifest`.
#[derive(Debug, Clone)]
pub struct SpecManifestCopyOptions {
    /// Record key holding the identifier used in diagnostics.
    pub field_id: String,
    /// Record key holding the list of relative paths.
    pub field_paths: String,
    /// Conflict behavior for destination files.
    pub rule_conflict_file: EnumManifestFileConflictStrategy,
    /// Copy permissions, timestamps and extended attributes alongside bytes.
    pub if_preserve_metadata: bool,
}

impl Default for SpecManifestCopyOptions {
    fn default() -> Self {
        Self {
            field_id: C_FIELD_ID_DEFAULT.to_string(),
            field_paths: C_FIELD_PATHS_DEFAULT.to_string(),
            rule_conflict_file: EnumManifestFileConflictStrategy::Skip,
            if_preserve_metadata: true,
        }
    }
}

/// One copy failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecCopyError {
    /// Failed source or destination path.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// Manifest loading failures. Each one aborts the run before copying starts.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file does not exist.
    #[error("Manifest file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Manifest content is not valid JSON.
    #[error("Failed to parse manifest {} as JSON ({source}); check the file format", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure while reading the manifest.
    #[error("Unexpected error while reading manifest {} ({source})", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// "Top-level call failed" errors for `copy_manifest`.
#[derive(Debug, Error)]
pub enum ManifestCopyError {
    /// Destination root could not be created.
    #[error("Failed to initialize destination {} ({source})", .path.display())]
    DestinationInitFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
