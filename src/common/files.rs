//! Filesystem operations used as local pipeline actions.
//!
//! These return plain `io::Result` so the runner can tell a missing path
//! apart from every other failure.

use std::fs;
use std::io;
use std::path::Path;

/// Remove a file, symlink or directory tree.
///
/// Fails with `NotFound` if nothing exists at `path`.
pub fn remove_path(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Move a file, falling back to copy and delete when a rename is not
/// possible (e.g. across filesystems).
///
/// A missing source is reported as `NotFound` and never falls back.
pub fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(e) => {
            log::debug!(
                "rename {} -> {} failed ({}), copying instead",
                src.display(),
                dst.display(),
                e
            );
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
    }
}
