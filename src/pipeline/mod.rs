//! Concurrent traversal-and-hash pipeline.
//!
//! Topology: one walker task feeds a bounded queue consumed by a fixed pool
//! of hash workers; worker outcomes flow over a second bounded channel to a
//! single collector, and a shared cancel flag propagates the first failure
//! back to every task. The digest map is either complete or the run fails as
//! a whole.

pub mod cancel;
pub mod collector;
pub mod hasher;
pub mod path;
pub mod reducer;
pub mod walker;

use crate::error::PipelineError;
use crate::types::{Digest, DigestMap};
use cancel::CancelFlag;
use hasher::TaskQueue;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, instrument};
use walker::{Walker, WalkerConfig};

/// Pipeline tuning knobs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Size of the hash worker pool
    pub workers: usize,
    /// Capacity of the task and result channels
    pub queue_depth: usize,
    /// Traversal configuration
    pub walker: WalkerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            workers,
            queue_depth: (workers * 2).max(32),
            walker: WalkerConfig::default(),
        }
    }
}

/// Digest state of a tree at one point in time
#[derive(Debug, Clone)]
pub struct TreeDigest {
    /// One entry per regular file reachable under the root
    pub files: DigestMap,
    /// Order-independent digest over the whole map
    pub aggregate: Digest,
}

/// Run the pipeline on the current runtime.
///
/// `cancel` is shared with every task the pipeline spawns; raising it
/// externally stops the run early with [`PipelineError::WalkCanceled`].
/// Internally the first file read error raises it too, so in-flight work
/// drains instead of piling up behind a failed run.
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn run(
    root: &Path,
    config: &PipelineConfig,
    cancel: &CancelFlag,
) -> Result<TreeDigest, PipelineError> {
    let started = Instant::now();
    let root = path::canonicalize_root(root)?;
    let worker_count = config.workers.max(1);
    info!(workers = worker_count, "starting tree digest");

    let (task_tx, task_rx) = mpsc::channel(config.queue_depth.max(1));
    let (result_tx, result_rx) = mpsc::channel(config.queue_depth.max(1));

    let queue: TaskQueue = Arc::new(Mutex::new(task_rx));
    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        workers.push(tokio::spawn(hasher::run_worker(
            Arc::clone(&queue),
            result_tx.clone(),
            cancel.clone(),
        )));
    }
    // Workers hold the only queue references, so the queue closes (and the
    // walker unblocks) as soon as they all exit.
    drop(queue);
    drop(result_tx);

    let walk_walker = Walker::with_config(root.clone(), config.walker.clone());
    let walk_cancel = cancel.clone();
    let walk = tokio::task::spawn_blocking(move || {
        let outcome = walk_walker.dispatch(&task_tx, &walk_cancel);
        drop(task_tx);
        outcome
    });

    let collected = collector::collect(result_rx, cancel).await;

    for worker in workers {
        worker
            .await
            .map_err(|e| PipelineError::Runtime(format!("hash worker failed: {e}")))?;
    }
    let walk_result = walk
        .await
        .map_err(|e| PipelineError::Runtime(format!("walker task failed: {e}")))?;

    // The first file read error wins; a cancellation-induced walk abort is
    // surfaced only when no file error caused it.
    let files = collected?;
    walk_result?;

    let aggregate = reducer::reduce(&files);
    info!(
        files = files.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "tree digest complete"
    );

    Ok(TreeDigest { files, aggregate })
}

/// Compute the digest state of the tree under `root`.
///
/// Synchronous entry point: builds a multi-threaded runtime internally and
/// blocks until the pipeline completes or fails.
pub fn compute_tree_digest(
    root: &Path,
    config: &PipelineConfig,
) -> Result<TreeDigest, PipelineError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| PipelineError::Runtime(format!("failed to build runtime: {e}")))?;

    let cancel = CancelFlag::new();
    runtime.block_on(run(root, config, &cancel))
}
