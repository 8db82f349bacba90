//! Filesystem walker that feeds the hash worker pool.

use crate::error::PipelineError;
use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::path;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// One regular file discovered during traversal, queued for hashing.
///
/// Created by the walker, consumed exactly once by a hash worker.
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Absolute on-disk path used for reading
    pub path: PathBuf,
    /// Root-relative digest-map key
    pub key: String,
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Directory or file names to skip entirely
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            // Skip the workspace state directory so recording a snapshot
            // does not change the digest it records.
            ignore_patterns: vec![".treesum".to_string()],
            max_depth: None,
        }
    }
}

/// Recursive directory walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker for a canonicalized root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Dispatch every regular file under the root into `tasks`.
    ///
    /// Must run on a blocking thread. Per-entry traversal errors are skipped
    /// so a single unreadable subtree does not abort the walk of its
    /// siblings. The cancel flag is checked before each dispatch; once it is
    /// raised no further files are dispatched and the walk reports
    /// [`PipelineError::WalkCanceled`]. Tasks already queued stay queued and
    /// drain through the workers.
    pub fn dispatch(
        &self,
        tasks: &mpsc::Sender<FileTask>,
        cancel: &CancelFlag,
    ) -> Result<(), PipelineError> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        let ignore = |entry: &DirEntry| self.should_ignore(entry);

        for entry in walker.into_iter().filter_entry(|e| !ignore(e)) {
            if cancel.is_raised() {
                debug!("cancellation observed mid-walk");
                return Err(PipelineError::WalkCanceled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable entries are skipped, not fatal.
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Symlinks carry their own file type here (links are never
            // followed) and fall outside the regular-file predicate.
            if !entry.file_type().is_file() {
                continue;
            }

            let task = FileTask {
                key: path::relative_key(&self.root, entry.path()),
                path: entry.path().to_path_buf(),
            };
            trace!(key = %task.key, "dispatching file");

            if tasks.blocking_send(task).is_err() {
                // The queue closes only after the workers exited, which only
                // happens once cancellation was raised.
                return Err(PipelineError::WalkCanceled);
            }
        }

        Ok(())
    }

    /// Check whether an entry matches an ignore pattern by component name
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.path() == self.root {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}
