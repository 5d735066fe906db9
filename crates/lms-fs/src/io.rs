//! Atomic file installation with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fs2::FileExt;

use crate::{Error, Result};

/// Temp file next to `path`, so the final rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Write into a locked temp sibling, then rename over `path`.
///
/// `fill` receives the open temp file. The temp file is removed if
/// anything fails before the rename, so `path` is either untouched or
/// fully replaced.
fn replace_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File, &Path) -> Result<()>,
{
    ensure_parent(path)?;
    let temp_path = temp_sibling(path);

    let result = (|| {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .lock_exclusive()
            .map_err(|_| Error::LockFailed {
                path: path.to_path_buf(),
            })?;

        fill(&mut temp_file, &temp_path)?;

        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

        temp_file.unlock().map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;
        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    replace_with(path, |file, temp_path| {
        file.write_all(content).map_err(|e| Error::io(temp_path, e))
    })
}

/// Copy a staged file to `dest`, replacing any existing file atomically.
///
/// When `modified` is given it becomes the modification time of the
/// installed file.
pub fn install_file(staged: &Path, dest: &Path, modified: Option<SystemTime>) -> Result<()> {
    replace_with(dest, |file, temp_path| {
        let mut source = File::open(staged).map_err(|e| Error::io(staged, e))?;
        std::io::copy(&mut source, file).map_err(|e| Error::io(temp_path, e))?;
        if let Some(time) = modified {
            file.set_modified(time).map_err(|e| Error::io(temp_path, e))?;
        }
        Ok(())
    })
}

/// Modification time of `path`, or `None` if it does not exist.
pub fn modified_time(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some).map_err(|e| Error::io(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
