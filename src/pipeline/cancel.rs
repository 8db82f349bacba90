//! Cooperative cancellation signal for one pipeline run.

use tokio_util::sync::CancellationToken;

/// Shared, write-once, broadcast cancellation flag.
///
/// Created once per pipeline run. Any number of tasks may hold a clone;
/// raising it twice is a no-op and it is never reset. Every blocking point in
/// the walker and the hash workers either polls `is_raised` or selects on
/// `raised`, so cancellation propagates within one pending operation's time
/// without force-killing in-flight work.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    token: CancellationToken,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Raise the signal. Idempotent.
    pub fn raise(&self) {
        self.token.cancel();
    }

    /// Non-blocking check, for synchronous code paths like the walker loop.
    pub fn is_raised(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal is raised. Used in `select!` arms at
    /// suspension points.
    pub async fn raised(&self) {
        self.token.cancelled().await;
    }
}
