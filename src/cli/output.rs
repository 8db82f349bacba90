//! User-facing error mapping for the CLI.

use crate::error::{PipelineError, TreesumError};

/// Map an error to the message printed on stderr
pub fn map_error(err: &TreesumError) -> String {
    match err {
        TreesumError::Pipeline(PipelineError::FileRead { path, source }) => {
            format!("error: could not read '{}': {}", path, source)
        }
        TreesumError::Pipeline(PipelineError::WalkCanceled) => {
            "error: walk canceled before completion".to_string()
        }
        TreesumError::Pipeline(PipelineError::InvalidRoot { root, source }) => {
            format!(
                "error: workspace root '{}' is not usable: {}",
                root.display(),
                source
            )
        }
        other => format!("error: {}", other),
    }
}
