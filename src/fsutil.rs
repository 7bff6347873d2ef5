//! Filesystem helpers

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Replace the file at `path` with `contents` via write-then-rename.
///
/// Symlinks are followed so the link target is what gets replaced. An
/// existing target must be writable, and its permissions carry over to
/// the new file. The temporary file lives next to the resolved target so
/// the rename stays on one filesystem.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_target(path)?;

    let existing = match fs::metadata(&target) {
        Ok(metadata) => {
            // fails the same way an in-place write would
            OpenOptions::new().write(true).open(&target)?;
            Some(metadata.permissions())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let parent = target
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"))?;

    let temp_path = parent.join(format!(".{}.tmp", uuid::Uuid::new_v4()));
    fs::write(&temp_path, contents)?;

    let result = match existing {
        Some(permissions) => fs::set_permissions(&temp_path, permissions),
        None => Ok(()),
    }
    .and_then(|()| fs::rename(&temp_path, &target));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Follow symlinks at `path`; a missing file resolves to itself
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}
