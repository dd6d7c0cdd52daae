//! Asset publisher — mirrors the static source tree into `<out>/static`.
//!
//! Any previous `<out>/static` is deleted first, so files removed from the
//! source do not linger in the output. Not safe against a concurrent build
//! targeting the same output directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{asset_err, AssetCopyError};

/// Name of the asset subtree inside the output directory.
pub const STATIC_DIR_NAME: &str = "static";

/// Outcome of publishing the asset tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub destination: PathBuf,
    /// Files copied (or that would be copied in dry-run mode).
    pub files: usize,
    pub dry_run: bool,
}

/// Replace `<out_dir>/static` with a fresh copy of `source`.
pub fn publish_assets(
    source: &Path,
    out_dir: &Path,
    dry_run: bool,
) -> Result<PublishReport, AssetCopyError> {
    if !source.is_dir() {
        return Err(AssetCopyError::MissingSource {
            path: source.to_path_buf(),
        });
    }
    let destination = out_dir.join(STATIC_DIR_NAME);

    if dry_run {
        let files = count_files(source)?;
        tracing::info!(
            "[dry-run] would publish {} static files to {}",
            files,
            destination.display()
        );
        return Ok(PublishReport { destination, files, dry_run });
    }

    if destination.exists() {
        tracing::debug!("removing previous {}", destination.display());
        std::fs::remove_dir_all(&destination).map_err(|e| asset_err(&destination, e))?;
    }
    let files = copy_tree(source, &destination)?;
    tracing::info!("published {} static files to {}", files, destination.display());
    Ok(PublishReport { destination, files, dry_run })
}

fn sorted_entries(dir: &Path) -> Result<Vec<std::fs::DirEntry>, AssetCopyError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| asset_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| asset_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// Recursive copy; symlinks are followed and their targets copied.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssetCopyError> {
    std::fs::create_dir_all(dst).map_err(|e| asset_err(dst, e))?;
    let mut copied = 0;
    for entry in sorted_entries(src)? {
        let path = entry.path();
        let target = dst.join(entry.file_name());
        let meta = std::fs::metadata(&path).map_err(|e| asset_err(&path, e))?;
        if meta.is_dir() {
            copied += copy_tree(&path, &target)?;
        } else if meta.is_file() {
            std::fs::copy(&path, &target).map_err(|e| asset_err(&path, e))?;
            tracing::debug!("copied {}", target.display());
            copied += 1;
        }
    }
    Ok(copied)
}

fn count_files(dir: &Path) -> Result<usize, AssetCopyError> {
    let mut count = 0;
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        let meta = std::fs::metadata(&path).map_err(|e| asset_err(&path, e))?;
        if meta.is_dir() {
            count += count_files(&path)?;
        } else if meta.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
