// src/write.rs

use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::{Result, ScrapeError};
use crate::types::PortedEntry;

/// Render entries as a 2-space indented JSON array with a trailing newline.
pub fn render_entries(entries: &[PortedEntry]) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(entries)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `entries` to `path` all-or-nothing: the full buffer goes to a temp
/// file next to the target, which is then renamed over it. The target is
/// left untouched on any failure.
#[instrument(level = "info", skip(path, entries), fields(path = %path.as_ref().display(), entries = entries.len()))]
pub fn write_entries<P: AsRef<Path>>(path: P, entries: &[PortedEntry]) -> Result<()> {
    let path = path.as_ref();
    let buf = render_entries(entries)?;

    let dir: PathBuf = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| ScrapeError::io(&dir, e))?;
    tmp.write_all(&buf)
        .and_then(|_| tmp.flush())
        .map_err(|e| ScrapeError::io(tmp.path(), e))?;
    set_mode(tmp.path())?;

    tmp.persist(path)
        .map_err(|e| ScrapeError::io(path, e.error))?;

    debug!(bytes = buf.len(), "wrote entries");
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
        .map_err(|e| ScrapeError::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path) -> Result<()> {
    Ok(())
}
