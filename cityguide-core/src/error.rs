//! Error types for cityguide-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::CollectionKind;

/// All errors that can arise while loading content sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The YAML file did not exist at the expected path.
    #[error("content source not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure (permission denied, not UTF-8, etc.).
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error; serde_yaml supplies the line context.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but has no such top-level key.
    #[error("{path} has no top-level `{key}` key")]
    MissingKey { path: PathBuf, key: String },

    /// The value under the key does not have the expected shape.
    #[error("unexpected shape for `{key}` in {path}: {source}")]
    Shape {
        path: PathBuf,
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// What is wrong with a collection record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordProblem {
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// The id cannot be used as a detail page file name.
    #[error("id `{0}` is not a valid file name")]
    UnsafeId(String),
}

/// A collection record lacks one of `id`, `name`, `category`, `coordinates`.
///
/// `index` is the zero-based position of the record in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collection} record #{index}{}: {problem}", describe_id(.id))]
pub struct MalformedRecordError {
    pub collection: CollectionKind,
    pub index: usize,
    pub id: Option<String>,
    pub problem: RecordProblem,
}

fn describe_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (id `{id}`)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_message_names_collection_and_id() {
        let err = MalformedRecordError {
            collection: CollectionKind::Parks,
            index: 2,
            id: Some("sad-park".to_string()),
            problem: RecordProblem::Missing("coordinates"),
        };
        assert_eq!(
            err.to_string(),
            "parks record #2 (id `sad-park`): missing required field `coordinates`"
        );
    }

    #[test]
    fn unsafe_id_message_quotes_the_id() {
        assert_eq!(
            RecordProblem::UnsafeId("../x".to_string()).to_string(),
            "id `../x` is not a valid file name"
        );
    }

    #[test]
    fn malformed_record_message_without_id() {
        let err = MalformedRecordError {
            collection: CollectionKind::Bars,
            index: 0,
            id: None,
            problem: RecordProblem::Missing("id"),
        };
        assert_eq!(err.to_string(), "bars record #0: missing required field `id`");
    }
}
