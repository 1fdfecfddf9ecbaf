//! Manifest copy constants and default values.

/// Record key holding the diagnostic identifier.
pub const C_FIELD_ID_DEFAULT: &str = "id";
/// Record key holding the relative image paths.
pub const C_FIELD_PATHS_DEFAULT: &str = "image_path";
/// Identifier printed for records without one.
pub const C_RECORD_ID_UNKNOWN: &str = "unknown";
/// Prefix of the one-line run summary.
pub const C_REPORT_PREFIX: &str = "[COPY]";
