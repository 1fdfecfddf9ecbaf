//! Copy the frames referenced by a YouCook2-style manifest into a local dataset tree.

use std::path::Path;

use framekit_io_fs::{ReportCopy, SpecManifestCopyOptions, copy_manifest};
use tracing::{Level, error};

/// Manifest file listing `image_path` entries.
const C_FILE_MANIFEST: &str = "youcook.json";
/// Root the manifest paths are relative to.
const C_DIR_SOURCE: &str = "../YouCook2/video_frames/";
/// Root receiving the mirrored copies.
const C_DIR_DESTINATION: &str = "YouCook2/";

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    run(C_FILE_MANIFEST, C_DIR_SOURCE, C_DIR_DESTINATION);
}

fn run(file_manifest: &str, dir_source: &str, dir_destination: &str) -> Option<ReportCopy> {
    match copy_manifest(
        Path::new(file_manifest),
        Path::new(dir_source),
        Path::new(dir_destination),
        SpecManifestCopyOptions::default(),
    ) {
        Ok(report) => Some(report),
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::run;

    #[test]
    fn run_copies_listed_frames() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("video_frames");
        let dst = tmp.path().join("YouCook2");
        let manifest = tmp.path().join("youcook.json");

        std::fs::create_dir_all(src.join("01lB162koHA")).expect("mkdir src");
        std::fs::write(src.join("01lB162koHA/frame_00000.jpg"), b"jpg").expect("write frame");
        std::fs::write(
            &manifest,
            r#"[{"id": "01lB162koHA", "image_path": ["01lB162koHA/frame_00000.jpg"]}]"#,
        )
        .expect("write manifest");

        let report = run(
            manifest.to_str().expect("utf-8 path"),
            src.to_str().expect("utf-8 path"),
            dst.to_str().expect("utf-8 path"),
        )
        .expect("report");
        assert_eq!(report.cnt_copied, 1);
        assert!(dst.join("01lB162koHA/frame_00000.jpg").exists());
    }

    #[test]
    fn run_swallows_missing_manifest() {
        let tmp = TempDir::new().expect("tempdir");
        let dst = tmp.path().join("YouCook2");

        let report = run(
            tmp.path().join("youcook.json").to_str().expect("utf-8 path"),
            tmp.path().join("video_frames").to_str().expect("utf-8 path"),
            dst.to_str().expect("utf-8 path"),
        );
        assert!(report.is_none());
        assert!(dst.is_dir());
    }
}
