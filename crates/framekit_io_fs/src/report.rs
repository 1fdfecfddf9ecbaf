//! Copy report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::conf::C_REPORT_PREFIX;
use crate::spec::SpecCopyError;

/// Aggregate counters and diagnostics for one `copy_manifest` run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ReportCopy {
    /// Number of manifest records visited.
    pub cnt_records: u64,
    /// Number of records skipped for a missing or malformed path list.
    pub cnt_records_skipped: u64,
    /// Number of path entries visited.
    pub cnt_entries: u64,
    /// Entries copied, including destinations that already existed.
    pub cnt_copied: u64,
    /// Entries whose source file does not exist.
    pub cnt_skipped: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Per-entry failures.
    pub errors: Vec<SpecCopyError>,
}

impl ReportCopy {
    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_records".to_string(), self.cnt_records);
        dict_counts.insert(
            "cnt_records_skipped".to_string(),
            self.cnt_records_skipped,
        );
        dict_counts.insert("cnt_entries".to_string(), self.cnt_entries);
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Full report (counters, warnings, errors) as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} records={} entries={} copied={} skipped={} errors={} warnings={}",
            self.cnt_records,
            self.cnt_entries,
            self.cnt_copied,
            self.cnt_skipped,
            self.error_count(),
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(C_REPORT_PREFIX))
    }
}

/// Mutable accumulator for copy statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    /// See [`ReportCopy::cnt_records`].
    pub cnt_records: u64,
    /// See [`ReportCopy::cnt_records_skipped`].
    pub cnt_records_skipped: u64,
    /// See [`ReportCopy::cnt_entries`].
    pub cnt_entries: u64,
    /// See [`ReportCopy::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportCopy::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportCopy::errors`].
    pub errors: Vec<SpecCopyError>,
    /// See [`ReportCopy::warnings`].
    pub warnings: Vec<String>,
}

impl ReportCopyBuilder {
    /// Increment record count by one.
    pub fn add_record(&mut self) {
        self.cnt_records += 1;
    }

    /// Increment skipped-record count by one.
    pub fn add_record_skipped(&mut self) {
        self.cnt_records_skipped += 1;
    }

    /// Increment entry count by one.
    pub fn add_entry(&mut self) {
        self.cnt_entries += 1;
    }

    /// Increment copied count by one.
    pub fn add_copied(&mut self) {
        self.cnt_copied += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.errors.push(SpecCopyError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            cnt_records: self.cnt_records,
            cnt_records_skipped: self.cnt_records_skipped,
            cnt_entries: self.cnt_entries,
            cnt_copied: self.cnt_copied,
            cnt_skipped: self.cnt_skipped,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ReportCopy, ReportCopyBuilder};

    #[test]
    fn report_copy_to_dict_and_format() {
        let report = ReportCopy {
            cnt_records: 4,
            cnt_records_skipped: 1,
            cnt_entries: 7,
            cnt_copied: 5,
            cnt_skipped: 2,
            warnings: vec!["w".to_string()],
            errors: vec![],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_records"], 4);
        assert_eq!(dict_counts["cnt_records_skipped"], 1);
        assert_eq!(dict_counts["cnt_entries"], 7);
        assert_eq!(dict_counts["cnt_copied"], 5);
        assert_eq!(dict_counts["cnt_skipped"], 2);
        assert_eq!(dict_counts["cnt_errors"], 0);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[COPY]");
        assert_eq!(
            txt,
            "[COPY] records=4 entries=7 copied=5 skipped=2 errors=0 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn report_builder_collects_errors_and_serializes() {
        let mut builder = ReportCopyBuilder::default();
        builder.add_record();
        builder.add_entry();
        builder.add_error(PathBuf::from("dst/a.jpg"), "denied".to_string());
        let report = builder.build();

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.cnt_copied, 0);

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("to json")).expect("parse json");
        assert_eq!(value["cnt_records"], 1);
        assert_eq!(value["errors"][0]["path"], "dst/a.jpg");
        assert_eq!(value["errors"][0]["exception"], "denied");
    }
}
