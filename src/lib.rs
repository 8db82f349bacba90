//! Treesum: Deterministic Directory Content Digests
//!
//! Computes a BLAKE3 digest for every regular file under a directory tree and
//! reduces them into one reproducible digest representing the tree's content
//! state, used to detect whether anything in a workspace changed since a
//! prior check.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod snapshot;
pub mod types;
