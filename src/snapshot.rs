//! Recorded digest state and change detection.
//!
//! A snapshot is the persisted [`TreeDigest`] of a prior run, stored under
//! the workspace state directory and compared against a fresh run by
//! `treesum check`.

use crate::config::STATE_DIR;
use crate::error::TreesumError;
use crate::pipeline::TreeDigest;
use crate::types::{digest_from_hex, digest_to_hex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Snapshot file name inside the state directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Persisted digest state of a workspace at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Aggregate digest, lowercase hex
    pub aggregate: String,

    /// Per-file digests, lowercase hex, keyed by root-relative path
    pub files: BTreeMap<String, String>,

    /// Number of files at recording time
    pub file_count: usize,

    /// When the snapshot was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Paths that changed between a snapshot and the current tree state
#[derive(Debug, Clone, Default)]
pub struct SnapshotDiff {
    /// Present now, absent in the snapshot
    pub added: Vec<String>,
    /// Present in the snapshot, absent now
    pub removed: Vec<String>,
    /// Present in both with different digests
    pub modified: Vec<String>,
}

impl SnapshotDiff {
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

impl Snapshot {
    /// Build a snapshot from a completed pipeline run
    pub fn from_tree_digest(digest: &TreeDigest) -> Self {
        let files = digest
            .files
            .iter()
            .map(|(path, d)| (path.clone(), digest_to_hex(d)))
            .collect::<BTreeMap<_, _>>();

        Self {
            aggregate: digest_to_hex(&digest.aggregate),
            file_count: files.len(),
            files,
            recorded_at: Utc::now(),
        }
    }

    /// Snapshot location for a workspace
    pub fn path_for(workspace_root: &Path) -> PathBuf {
        workspace_root.join(STATE_DIR).join(SNAPSHOT_FILE)
    }

    /// Persist under the workspace state directory, creating it if needed
    pub fn save(&self, workspace_root: &Path) -> Result<PathBuf, TreesumError> {
        let path = Self::path_for(workspace_root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, serialized)?;
        Ok(path)
    }

    /// Load the recorded snapshot, if one exists.
    ///
    /// A present-but-corrupt snapshot is an error, not a silent miss, so
    /// `check` cannot report "changed" against garbage.
    pub fn load(workspace_root: &Path) -> Result<Option<Snapshot>, TreesumError> {
        let path = Self::path_for(workspace_root);
        if !path.is_file() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;

        if digest_from_hex(&snapshot.aggregate).is_none() {
            return Err(TreesumError::Snapshot(format!(
                "corrupt aggregate digest in {}",
                path.display()
            )));
        }

        Ok(Some(snapshot))
    }

    /// Whether the current tree state matches this snapshot
    pub fn matches(&self, current: &TreeDigest) -> bool {
        self.aggregate == digest_to_hex(&current.aggregate)
    }

    /// Per-path comparison against the current tree state
    pub fn diff(&self, current: &TreeDigest) -> SnapshotDiff {
        let mut diff = SnapshotDiff::default();

        for (path, digest) in &current.files {
            match self.files.get(path) {
                None => diff.added.push(path.clone()),
                Some(recorded) if *recorded != digest_to_hex(digest) => {
                    diff.modified.push(path.clone());
                }
                Some(_) => {}
            }
        }

        for path in self.files.keys() {
            if !current.files.contains_key(path) {
                diff.removed.push(path.clone());
            }
        }

        diff
    }
}
