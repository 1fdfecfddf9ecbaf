//! Manifest loading and record field access.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::conf::C_RECORD_ID_UNKNOWN;
use crate::spec::ManifestError;

/// Read a JSON manifest into a list of records.
///
/// A top-level value that is not an array is treated as a single record, so
/// `{"id": ..}` and `[{"id": ..}]` load identically.
pub fn load_manifest<P: AsRef<Path>>(file_manifest: P) -> Result<Vec<Value>, ManifestError> {
    let path_manifest = file_manifest.as_ref();
    let c_content = fs::read_to_string(path_manifest).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ManifestError::NotFound {
            path: path_manifest.to_path_buf(),
        },
        _ => ManifestError::Io {
            path: path_manifest.to_path_buf(),
            source: e,
        },
    })?;

    let value_root: Value =
        serde_json::from_str(&c_content).map_err(|e| ManifestError::Parse {
            path: path_manifest.to_path_buf(),
            source: e,
        })?;

    Ok(match value_root {
        Value::Array(l_records) => l_records,
        value_other => vec![value_other],
    })
}

/// Identifier of a record for diagnostics, or `unknown` when absent.
pub fn derive_record_id(record: &Value, field_id: &str) -> String {
    match record.get(field_id) {
        None | Some(Value::Null) => C_RECORD_ID_UNKNOWN.to_string(),
        Some(Value::String(c_id)) => c_id.clone(),
        Some(value_id) => value_id.to_string(),
    }
}

/// Path list of a record, or `None` when the field is missing or not an array.
pub fn derive_record_paths<'a>(record: &'a Value, field_paths: &str) -> Option<&'a [Value]> {
    record
        .get(field_paths)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}
