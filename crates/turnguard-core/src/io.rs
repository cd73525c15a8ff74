use crate::error::{GateError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting runtime files.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Symlink management
// ---------------------------------------------------------------------------

/// Outcome of [`ensure_symlink`], for per-item install reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// No link existed; a new one was created.
    Created,
    /// A symlink existed but pointed elsewhere; it was replaced.
    Updated,
    /// A symlink already pointed at the requested target.
    Unchanged,
}

/// Ensure `link` is a symlink pointing at `target`.
///
/// Idempotent: a link that already resolves to `target` is left alone. A
/// stale symlink is replaced. A regular file or directory at `link` is an
/// error — the installer never deletes user content.
pub fn ensure_symlink(target: &Path, link: &Path) -> Result<LinkOutcome> {
    match std::fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if std::fs::read_link(link)? == target {
                return Ok(LinkOutcome::Unchanged);
            }
            std::fs::remove_file(link)?;
            std::os::unix::fs::symlink(target, link)?;
            Ok(LinkOutcome::Updated)
        }
        Ok(_) => Err(GateError::NotASymlink(link.display().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::os::unix::fs::symlink(target, link)?;
            Ok(LinkOutcome::Created)
        }
        Err(e) => Err(e.into()),
    }
}
