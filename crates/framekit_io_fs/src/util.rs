use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

/// Derive the path of a manifest entry relative to the source root.
///
/// Relative entries are normalized lexically (`.` dropped, `..` folded into
/// the preceding component). Absolute entries are accepted only when they live
/// under `path_dir_src`. Anything that would climb above the root is rejected.
///
/// # Examples
/// ```ignore
/// use std::path::Path;
/// let path_dir_src = Path::new("/frames");
///
/// let rel = derive_relative_entry_path("a/./f1.jpg", path_dir_src).unwrap();
/// assert_eq!(rel, Path::new("a/f1.jpg"));
///
/// let rel = derive_relative_entry_path("/frames/b/f2.jpg", path_dir_src).unwrap();
/// assert_eq!(rel, Path::new("b/f2.jpg"));
///
/// assert!(derive_relative_entry_path("../f3.jpg", path_dir_src).is_err());
/// ```
pub(crate) fn derive_relative_entry_path(
    c_entry: &str,
    path_dir_src: &Path,
) -> Result<PathBuf, String> {
    if c_entry.is_empty() {
        return Err("Empty path entry".to_string());
    }

    let path_entry = Path::new(c_entry);
    let path_entry_rel = if path_entry.is_absolute() {
        path_entry.strip_prefix(path_dir_src).map_err(|_| {
            format!(
                "Absolute path entry is outside the source root: {c_entry} (root={})",
                path_dir_src.display()
            )
        })?
    } else {
        path_entry
    };

    let mut path_normalized = PathBuf::new();
    for component in path_entry_rel.components() {
        match component {
            Component::Normal(part) => path_normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !path_normalized.pop() {
                    return Err(format!("Path entry escapes the source root: {c_entry}"));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("Path entry is not relative: {c_entry}"));
            }
        }
    }

    if path_normalized.file_name().is_none() {
        return Err(format!("Path entry has no file name: {c_entry}"));
    }
    Ok(path_normalized)
}

/// Split a normalized relative entry into `(destination subdirectory, destination file)`.
pub(crate) fn derive_destination_paths(
    path_entry_rel: &Path,
    path_file_src: &Path,
    path_dir_dst: &Path,
) -> (PathBuf, PathBuf) {
    let path_dir_dst_sub = match path_entry_rel.parent() {
        Some(path_parent) => path_dir_dst.join(path_parent),
        None => path_dir_dst.to_path_buf(),
    };
    let path_file_dst = match path_file_src.file_name() {
        Some(name_file) => path_dir_dst_sub.join(name_file),
        None => path_dir_dst.join(path_entry_rel),
    };
    (path_dir_dst_sub, path_file_dst)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
    if_preserve_metadata: bool,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;
    if if_preserve_metadata {
        apply_metadata(path_file_src, path_file_dst)?;
    }
    Ok(())
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;

    // xattrs go before the final mode: a read-only destination rejects `user.*` writes.
    #[cfg(target_os = "linux")]
    {
        copy_xattrs_linux(path_file_src, path_file_dst)?;
    }

    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use std::os::unix::fs::PermissionsExt;

    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return Ok(()),
    };
    let l_xattr_names = iter_xattr_names.collect::<Vec<_>>();
    if l_xattr_names.is_empty() {
        return Ok(());
    }

    // `fs::copy` already carried the source mode over; the caller resets it afterwards.
    let mut perm_dst = fs::metadata(path_file_dst)?.permissions();
    if perm_dst.mode() & 0o200 == 0 {
        perm_dst.set_mode(perm_dst.mode() | 0o200);
        fs::set_permissions(path_file_dst, perm_dst)?;
    }

    for name in l_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        let _ = xattr::set(path_file_dst, &name, &raw_value);
    }
    Ok(())
}

/// Hex SHA-256 digest of a file's content.
pub(crate) fn calculate_file_digest(path_file: &Path) -> Result<String, io::Error> {
    let mut file = fs::File::open(path_file)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
