//! `framekit_io_fs` v1:
//! Manifest-driven image copy engine.
//!
//! Modules:
//! - `conf`     : default field names and paths
//! - `manifest` : JSON manifest loading and record field access
//! - `copy`     : record/entry processing and copy orchestration
//! - `spec`     : enums/options/errors
//! - `report`   : run-time report model
//! - `util`     : path resolution, metadata-preserving copy, digests

pub mod conf;
pub mod copy;
pub mod manifest;
pub mod report;
pub mod spec;
mod util;

pub use conf::{C_FIELD_ID_DEFAULT, C_FIELD_PATHS_DEFAULT, C_REPORT_PREFIX};
pub use copy::copy_manifest;
pub use manifest::load_manifest;
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{
    EnumManifestFileConflictStrategy, ManifestCopyError, ManifestError, SpecCopyError,
    SpecManifestCopyOptions,
};
