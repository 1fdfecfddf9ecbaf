//! Manifest-driven copy orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::manifest::{derive_record_id, derive_record_paths, load_manifest};
use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{EnumManifestFileConflictStrategy, ManifestCopyError, SpecManifestCopyOptions};
use crate::util::{
    calculate_file_digest, copy_file_with_metadata, derive_destination_paths,
    derive_relative_entry_path,
};

#[derive(Debug, Clone)]
struct SpecCopyTaskFile {
    path_file_src: PathBuf,
    path_dir_dst_sub: PathBuf,
    path_file_dst: PathBuf,
}

#[derive(Debug)]
struct SpecCopyContext {
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
    spec_cp_options: SpecManifestCopyOptions,
    builder_cp_report: ReportCopyBuilder,
}

/// Copy every file listed in a JSON manifest from `dir_source` to `dir_destination`.
///
/// Each record's path list (`SpecManifestCopyOptions::field_paths`) holds paths
/// relative to `dir_source`; copies land at the same relative location under
/// `dir_destination`.
///
/// This function performs:
/// 1. Destination root creation (before the manifest is read).
/// 2. Manifest load; a single JSON object counts as a one-record manifest.
/// 3. Sequential record/entry processing with per-entry error isolation.
/// 4. Report aggregation and a summary log line.
///
/// Returns [`ReportCopy`] when the pass completes (with possible per-entry
/// errors stored in the report). Returns [`ManifestCopyError`] only when the
/// destination root cannot be created or the manifest cannot be loaded; no file
/// is copied in that case.
pub fn copy_manifest<M, P, Q>(
    file_manifest: M,
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: SpecManifestCopyOptions,
) -> Result<ReportCopy, ManifestCopyError>
where
    M: AsRef<Path>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    fs::create_dir_all(&path_dir_dst).map_err(|e| ManifestCopyError::DestinationInitFailed {
        path: path_dir_dst.clone(),
        source: e,
    })?;
    info!("Destination directory ready: {}", path_dir_dst.display());

    let l_records = load_manifest(file_manifest)?;

    let mut spec_cp_ctx = SpecCopyContext {
        path_dir_src,
        path_dir_dst,
        spec_cp_options,
        builder_cp_report: ReportCopyBuilder::default(),
    };
    for record in &l_records {
        handle_record(record, &mut spec_cp_ctx);
    }

    let report = spec_cp_ctx.builder_cp_report.build();
    info!(
        "Done. Copied {} image files (including existing ones), skipped {} missing source files.",
        report.cnt_copied, report.cnt_skipped
    );
    info!("{report}");
    Ok(report)
}

fn handle_record(record: &Value, spec_cp_ctx: &mut SpecCopyContext) {
    spec_cp_ctx.builder_cp_report.add_record();

    let Some(l_entries) = derive_record_paths(record, &spec_cp_ctx.spec_cp_options.field_paths)
    else {
        let c_record_id = derive_record_id(record, &spec_cp_ctx.spec_cp_options.field_id);
        let c_warning = format!(
            "Skipping record without a `{}` list: {c_record_id}",
            spec_cp_ctx.spec_cp_options.field_paths
        );
        warn!("{c_warning}");
        spec_cp_ctx.builder_cp_report.add_record_skipped();
        spec_cp_ctx.builder_cp_report.add_warning(c_warning);
        return;
    };

    for value_entry in l_entries {
        spec_cp_ctx.builder_cp_report.add_entry();
        let Some(c_entry) = value_entry.as_str() else {
            let c_record_id = derive_record_id(record, &spec_cp_ctx.spec_cp_options.field_id);
            let c_warning =
                format!("Ignoring non-string path entry {value_entry} in record {c_record_id}");
            warn!("{c_warning}");
            spec_cp_ctx.builder_cp_report.add_warning(c_warning);
            continue;
        };
        handle_path_entry(c_entry, spec_cp_ctx);
    }
}

fn handle_path_entry(c_entry: &str, spec_cp_ctx: &mut SpecCopyContext) {
    let path_entry_rel = match derive_relative_entry_path(c_entry, &spec_cp_ctx.path_dir_src) {
        Ok(v) => v,
        Err(message) => {
            error!("{message}");
            spec_cp_ctx
                .builder_cp_report
                .add_error(spec_cp_ctx.path_dir_src.join(c_entry), message);
            return;
        }
    };

    let path_file_src = spec_cp_ctx.path_dir_src.join(&path_entry_rel);
    let (path_dir_dst_sub, path_file_dst) =
        derive_destination_paths(&path_entry_rel, &path_file_src, &spec_cp_ctx.path_dir_dst);
    debug!(
        "Resolved {c_entry}: {} -> {}",
        path_file_src.display(),
        path_file_dst.display()
    );

    handle_file_task(
        SpecCopyTaskFile {
            path_file_src,
            path_dir_dst_sub,
            path_file_dst,
        },
        spec_cp_ctx,
    );
}

fn handle_file_task(spec_task: SpecCopyTaskFile, spec_cp_ctx: &mut SpecCopyContext) {
    if let Err(e) = fs::create_dir_all(&spec_task.path_dir_dst_sub) {
        let message = format!(
            "Failed to create destination directory {} ({e})",
            spec_task.path_dir_dst_sub.display()
        );
        error!("{message}");
        spec_cp_ctx
            .builder_cp_report
            .add_error(spec_task.path_dir_dst_sub, message);
        return;
    }

    if !spec_task.path_file_src.exists() {
        let c_warning = format!(
            "Source file does not exist, skipping: {}",
            spec_task.path_file_src.display()
        );
        warn!("{c_warning}");
        spec_cp_ctx.builder_cp_report.add_skipped();
        spec_cp_ctx.builder_cp_report.add_warning(c_warning);
        return;
    }

    if should_skip_file_conflict(&spec_task, spec_cp_ctx) {
        return;
    }

    info!(
        "Copying {} to {}...",
        spec_task.path_file_src.display(),
        spec_task.path_file_dst.display()
    );
    match copy_file_with_metadata(
        &spec_task.path_file_src,
        &spec_task.path_file_dst,
        spec_cp_ctx.spec_cp_options.if_preserve_metadata,
    ) {
        Ok(_) => {
            spec_cp_ctx.builder_cp_report.add_copied();
            info!(
                "Copied: {}",
                spec_task
                    .path_file_src
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default()
            );
        }
        Err(e) => {
            let message = format!(
                "Failed to copy {} to {} ({e})",
                spec_task.path_file_src.display(),
                spec_task.path_file_dst.display()
            );
            error!("{message}");
            spec_cp_ctx
                .builder_cp_report
                .add_error(spec_task.path_file_dst, message);
        }
    }
}

/// Resolve an existing destination file. Returns `true` when the entry is
/// settled and must not be copied.
fn should_skip_file_conflict(
    spec_task: &SpecCopyTaskFile,
    spec_cp_ctx: &mut SpecCopyContext,
) -> bool {
    let path_file_dst = &spec_task.path_file_dst;
    if !path_file_dst.exists() {
        return false;
    }
    if path_file_dst.is_dir() {
        let message = format!("Destination is a directory: {}", path_file_dst.display());
        error!("{message}");
        spec_cp_ctx
            .builder_cp_report
            .add_error(path_file_dst.clone(), message);
        return true;
    }

    match spec_cp_ctx.spec_cp_options.rule_conflict_file {
        EnumManifestFileConflictStrategy::Skip => {
            info!(
                "Destination already exists, skipping copy: {}",
                path_file_dst.display()
            );
            spec_cp_ctx.builder_cp_report.add_copied();
            true
        }
        EnumManifestFileConflictStrategy::Overwrite => false,
        EnumManifestFileConflictStrategy::VerifyDigest => {
            let res_digests = calculate_file_digest(&spec_task.path_file_src).and_then(|c_src| {
                calculate_file_digest(path_file_dst).map(|c_dst| (c_src, c_dst))
            });
            match res_digests {
                Ok((c_digest_src, c_digest_dst)) if c_digest_src == c_digest_dst => {
                    info!(
                        "Destination already exists with identical content: {}",
                        path_file_dst.display()
                    );
                    spec_cp_ctx.builder_cp_report.add_copied();
                    true
                }
                Ok(_) => {
                    let c_warning = format!(
                        "Destination content differs from source, overwriting: {}",
                        path_file_dst.display()
                    );
                    warn!("{c_warning}");
                    spec_cp_ctx.builder_cp_report.add_warning(c_warning);
                    false
                }
                Err(e) => {
                    let message = format!(
                        "Failed to compare {} with {} ({e})",
                        spec_task.path_file_src.display(),
                        path_file_dst.display()
                    );
                    error!("{message}");
                    spec_cp_ctx
                        .builder_cp_report
                        .add_error(path_file_dst.clone(), message);
                    true
                }
            }
        }
    }
}
