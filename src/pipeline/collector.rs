//! Result collection with first-error-wins semantics.

use crate::error::PipelineError;
use crate::pipeline::cancel::CancelFlag;
use crate::pipeline::hasher::HashOutcome;
use crate::types::DigestMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Consume hash outcomes until the result stream closes.
///
/// The collector is the sole owner of the digest map for the whole run. On
/// the first errored outcome it raises the cancel flag, keeps draining the
/// stream while discarding everything that arrives, and reports that single
/// error as the pipeline outcome. Errors observed after the first are
/// dropped. A map is returned only when every dispatched file hashed
/// cleanly.
pub async fn collect(
    mut results: mpsc::Receiver<HashOutcome>,
    cancel: &CancelFlag,
) -> Result<DigestMap, PipelineError> {
    let mut files = DigestMap::new();
    let mut first_error: Option<PipelineError> = None;

    while let Some(outcome) = results.recv().await {
        if first_error.is_some() {
            debug!(path = %outcome.key, "discarding result after failure");
            continue;
        }

        match outcome.result {
            Ok(digest) => {
                files.insert(outcome.key, digest);
            }
            Err(source) => {
                warn!(path = %outcome.key, error = %source, "read failed, canceling run");
                cancel.raise();
                first_error = Some(PipelineError::FileRead {
                    path: outcome.key,
                    source,
                });
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(files),
    }
}
