//! Error types for cityguide-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (template syntax, context conversion).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// A page failed to render (missing variable or failing filter).
    #[error("failed to render {output} from template `{template}`: {source}")]
    Page {
        template: &'static str,
        output: PathBuf,
        #[source]
        source: tera::Error,
    },

    /// JSON serialization error (building page context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
