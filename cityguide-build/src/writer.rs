//! Page writer.
//!
//! ## `write_page` — 5-step protocol
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 hash the rendered content.
//! 3. Hash the file already at the target path, if any → skip if identical.
//! 4. Write to `<path>.cityguide.tmp` (parent directories created as needed).
//! 5. Rename to final path (atomic on POSIX).
//!
//! Skipping identical files keeps re-runs on unchanged content from touching
//! the output tree at all.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{io_err, BuildError};

/// Outcome of an individual page write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Skipped: the file on disk already has this content.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

fn digest_on_disk(path: &Path) -> Result<Option<String>, BuildError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(digest(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Write one rendered page to `path`, replacing any previous content.
pub fn write_page(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, BuildError> {
    let tmp = PathBuf::from(format!("{}.cityguide.tmp", path.display()));
    write_page_with_tmp(path, content, dry_run, &tmp)
}

fn write_page_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, BuildError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    if digest_on_disk(path)?.as_deref() == Some(digest(content.as_bytes()).as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
