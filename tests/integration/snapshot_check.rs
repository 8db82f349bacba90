//! Integration tests for snapshot recording and change detection

use super::test_utils::build_tree;
use std::fs;
use tempfile::TempDir;
use treesum::pipeline::{compute_tree_digest, PipelineConfig};
use treesum::snapshot::Snapshot;

/// Recording a snapshot must not change the digest it records: the state
/// directory is excluded from traversal
#[test]
fn test_recording_does_not_perturb_the_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("a.txt", "alpha")]);

    let config = PipelineConfig::default();
    let before = compute_tree_digest(root, &config).unwrap();

    Snapshot::from_tree_digest(&before).save(root).unwrap();

    let after = compute_tree_digest(root, &config).unwrap();
    assert_eq!(before.aggregate, after.aggregate);
    assert_eq!(before.files, after.files);
}

/// Full record-modify-diff cycle across the filesystem
#[test]
fn test_diff_after_filesystem_changes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(
        root,
        &[("keep.txt", "same"), ("gone.txt", "bye"), ("edit.txt", "v1")],
    );

    let config = PipelineConfig::default();
    let recorded = compute_tree_digest(root, &config).unwrap();
    let snapshot = Snapshot::from_tree_digest(&recorded);
    snapshot.save(root).unwrap();

    fs::remove_file(root.join("gone.txt")).unwrap();
    fs::write(root.join("edit.txt"), "v2").unwrap();
    fs::write(root.join("new.txt"), "hi").unwrap();

    let current = compute_tree_digest(root, &config).unwrap();
    let loaded = Snapshot::load(root).unwrap().unwrap();
    let diff = loaded.diff(&current);

    assert_eq!(diff.added, vec!["new.txt".to_string()]);
    assert_eq!(diff.removed, vec!["gone.txt".to_string()]);
    assert_eq!(diff.modified, vec!["edit.txt".to_string()]);
    assert!(!loaded.matches(&current));
}

/// An untouched workspace stays clean across save/load
#[test]
fn test_untouched_workspace_is_clean() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("a.txt", "alpha"), ("b/c.txt", "gamma")]);

    let config = PipelineConfig::default();
    let recorded = compute_tree_digest(root, &config).unwrap();
    Snapshot::from_tree_digest(&recorded).save(root).unwrap();

    let current = compute_tree_digest(root, &config).unwrap();
    let loaded = Snapshot::load(root).unwrap().unwrap();

    assert!(loaded.matches(&current));
    assert!(loaded.diff(&current).is_clean());
}
