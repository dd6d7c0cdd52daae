//! Error types for cityguide-build.

use std::path::PathBuf;

use thiserror::Error;

use cityguide_core::{LoadError, MalformedRecordError};
use cityguide_renderer::RenderError;

/// Failure while publishing the static asset tree.
#[derive(Debug, Error)]
pub enum AssetCopyError {
    /// The asset source directory does not exist.
    #[error("static asset source not found at {path}")]
    MissingSource { path: PathBuf },

    /// Copy, delete or directory creation failed.
    #[error("asset I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A content source is missing or malformed.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A collection record lacks a required field.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] MalformedRecordError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Static assets could not be published.
    #[error("asset copy error: {0}")]
    Assets(#[from] AssetCopyError),

    /// An I/O error writing the output tree, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`AssetCopyError::Io`].
pub(crate) fn asset_err(path: impl Into<PathBuf>, source: std::io::Error) -> AssetCopyError {
    AssetCopyError::Io {
        path: path.into(),
        source,
    }
}
