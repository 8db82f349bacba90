//! Error types for the treesum digest pipeline and CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the traversal-and-hash pipeline.
///
/// A run fails as a whole with exactly one of these; partial digest maps are
/// never handed back alongside an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A file could not be opened or fully read. Tagged with the
    /// root-relative path of the offending file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Traversal stopped early because cancellation was observed.
    #[error("walk canceled")]
    WalkCanceled,

    /// The workspace root itself could not be resolved.
    #[error("invalid root {root:?}: {source}")]
    InvalidRoot {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The internal runtime or a pipeline task failed to start or join.
    #[error("pipeline runtime error: {0}")]
    Runtime(String),
}

/// Top-level errors surfaced by the CLI layer
#[derive(Debug, Error)]
pub enum TreesumError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no snapshot recorded for this workspace (run `treesum record` first)")]
    NoSnapshot,

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TreesumError {
    fn from(err: serde_json::Error) -> Self {
        TreesumError::Snapshot(err.to_string())
    }
}

impl From<toml::de::Error> for TreesumError {
    fn from(err: toml::de::Error) -> Self {
        TreesumError::Config(err.to_string())
    }
}
