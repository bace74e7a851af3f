//! Cooperative cancellation for long-running scans and reranks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable cancellation flag checked between outer-loop iterations.
///
/// Cancellation is cooperative: a cancelled scan or rerank returns an
/// explicit `Cancelled` error, never a truncated-but-unlabeled result.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        // Release: publishes any writes made before cancelling to the
        // worker that observes the flag with Acquire.
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        // Acquire: pairs with the Release store in cancel().
        self.cancelled.load(Ordering::Acquire)
    }
}
