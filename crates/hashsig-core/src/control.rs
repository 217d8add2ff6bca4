//! Cooperative cancellation for long-running verification work.
//!
//! A `CancelToken` is handed to the pipeline and the digest engine. A caller
//! (e.g. the CLI's ctrl-c handler) flips it; the engine checks it before every
//! chunk read and the pipeline checks it between stages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Error returned when work is stopped through a `CancelToken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
