//! Property-based tests for the digest pipeline

mod determinism;
