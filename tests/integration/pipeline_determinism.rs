//! Integration tests for digest map completeness and aggregate determinism

use super::test_utils::build_tree;
use std::fs;
use tempfile::TempDir;
use treesum::pipeline::hasher::digest_bytes;
use treesum::pipeline::{compute_tree_digest, PipelineConfig};
use treesum::types::digest_to_hex;

/// The same filesystem produces the same map and aggregate across runs
#[test]
fn test_repeated_runs_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(
        root,
        &[
            ("file1.txt", "content1"),
            ("dir1/file2.txt", "content2"),
            ("dir1/nested/file3.txt", "content3"),
        ],
    );

    let config = PipelineConfig::default();
    let first = compute_tree_digest(root, &config).unwrap();
    let second = compute_tree_digest(root, &config).unwrap();

    assert_eq!(first.files.len(), 3);
    assert_eq!(first.files, second.files);
    assert_eq!(first.aggregate, second.aggregate);
}

/// Every regular file reachable from the root gets exactly one entry
#[test]
fn test_map_is_complete() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(
        root,
        &[
            ("a.txt", "a"),
            ("b/b.txt", "b"),
            ("b/c/d.txt", "d"),
            ("e.bin", "e"),
        ],
    );

    let digest = compute_tree_digest(root, &PipelineConfig::default()).unwrap();

    let mut keys: Vec<_> = digest.files.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["a.txt", "b/b.txt", "b/c/d.txt", "e.bin"]);
}

/// Changing one file's bytes changes its entry and the aggregate
#[test]
fn test_content_change_changes_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("stable.txt", "same"), ("edited.txt", "v1")]);

    let config = PipelineConfig::default();
    let before = compute_tree_digest(root, &config).unwrap();

    fs::write(root.join("edited.txt"), "v2").unwrap();
    let after = compute_tree_digest(root, &config).unwrap();

    assert_eq!(before.files["stable.txt"], after.files["stable.txt"]);
    assert_ne!(before.files["edited.txt"], after.files["edited.txt"]);
    assert_ne!(before.aggregate, after.aggregate);
}

/// Swapping which path holds which content changes the aggregate even though
/// the path set and digest set both stay the same
#[test]
fn test_pairing_swap_changes_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("a", "x"), ("b", "y")]);

    let config = PipelineConfig::default();
    let paired = compute_tree_digest(root, &config).unwrap();

    fs::write(root.join("a"), "y").unwrap();
    fs::write(root.join("b"), "x").unwrap();
    let swapped = compute_tree_digest(root, &config).unwrap();

    assert_eq!(
        paired.files.keys().collect::<Vec<_>>(),
        swapped.files.keys().collect::<Vec<_>>()
    );
    assert_ne!(paired.aggregate, swapped.aggregate);
}

/// On-disk creation order never influences the aggregate
#[test]
fn test_creation_order_is_irrelevant() {
    let entries = [("alpha.txt", "1"), ("mid.txt", "2"), ("zeta.txt", "3")];

    let forward_dir = TempDir::new().unwrap();
    build_tree(forward_dir.path(), &entries);

    let mut reversed = entries;
    reversed.reverse();
    let reverse_dir = TempDir::new().unwrap();
    build_tree(reverse_dir.path(), &reversed);

    let config = PipelineConfig::default();
    let forward = compute_tree_digest(forward_dir.path(), &config).unwrap();
    let backward = compute_tree_digest(reverse_dir.path(), &config).unwrap();

    assert_eq!(forward.aggregate, backward.aggregate);
}

/// Worked two-file scenario: aggregate is the digest of the two per-file
/// digests concatenated as hex in path order
#[test]
fn test_two_file_aggregate_value() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("a", "x"), ("b", "y")]);

    let digest = compute_tree_digest(root, &PipelineConfig::default()).unwrap();

    let mut buffer = String::new();
    buffer.push_str(&digest_to_hex(&digest_bytes(b"x")));
    buffer.push_str(&digest_to_hex(&digest_bytes(b"y")));
    let expected = digest_bytes(buffer.as_bytes());

    assert_eq!(digest.files.len(), 2);
    assert_eq!(digest.aggregate, expected);
}

/// Empty root: empty map, aggregate of the empty buffer
#[test]
fn test_empty_root() {
    let temp_dir = TempDir::new().unwrap();

    let digest = compute_tree_digest(temp_dir.path(), &PipelineConfig::default()).unwrap();

    assert!(digest.files.is_empty());
    assert_eq!(digest.aggregate, digest_bytes(b""));
}

/// Adding or removing a file changes the aggregate
#[test]
fn test_file_addition_and_removal_change_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_tree(root, &[("keep.txt", "k")]);

    let config = PipelineConfig::default();
    let base = compute_tree_digest(root, &config).unwrap();

    fs::write(root.join("extra.txt"), "e").unwrap();
    let grown = compute_tree_digest(root, &config).unwrap();
    assert_ne!(base.aggregate, grown.aggregate);

    fs::remove_file(root.join("extra.txt")).unwrap();
    let shrunk = compute_tree_digest(root, &config).unwrap();
    assert_eq!(base.aggregate, shrunk.aggregate);
}
