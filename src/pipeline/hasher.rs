//! BLAKE3 content hashing and the hash worker loop.

use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::walker::FileTask;
use crate::types::Digest;
use blake3::Hasher;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::{mpsc, Mutex};
use tracing::trace;

/// Result of hashing one dispatched file.
///
/// Exactly one outcome is produced per dispatched [`FileTask`]; ownership
/// transfers to the collector on delivery.
#[derive(Debug)]
pub struct HashOutcome {
    /// Root-relative digest-map key of the hashed file
    pub key: String,
    /// Content digest, or the read error that prevented it
    pub result: Result<Digest, std::io::Error>,
}

/// The digest function: BLAKE3 over a byte sequence
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    *hasher.finalize().as_bytes()
}

/// Stream a file's full contents into the digest function.
///
/// Any read failure, including one after a partial read, surfaces as an
/// error; a truncated read never produces a digest.
pub async fn hash_file(path: &Path) -> std::io::Result<Digest> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Task queue shared by the worker pool
pub type TaskQueue = Arc<Mutex<mpsc::Receiver<FileTask>>>;

/// One pool member: pull tasks, hash, deliver outcomes.
///
/// Both blocking points select against the cancel flag: once it is raised
/// the worker stops pulling new tasks and abandons any undelivered outcome
/// instead of blocking shutdown. A task already pulled is always hashed to
/// completion before the flag is consulted again.
pub async fn run_worker(
    queue: TaskQueue,
    results: mpsc::Sender<HashOutcome>,
    cancel: CancelFlag,
) {
    while let Some(task) = next_task(&queue, &cancel).await {
        trace!(key = %task.key, "hashing");
        let result = hash_file(&task.path).await;
        let outcome = HashOutcome {
            key: task.key,
            result,
        };

        tokio::select! {
            biased;
            _ = cancel.raised() => return,
            sent = results.send(outcome) => {
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}

async fn next_task(queue: &Mutex<mpsc::Receiver<FileTask>>, cancel: &CancelFlag) -> Option<FileTask> {
    let mut rx = queue.lock().await;
    tokio::select! {
        biased;
        _ = cancel.raised() => None,
        task = rx.recv() => task,
    }
}
