//! Minimal test support utilities for blursave consumers.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::invoker::{SaveError, SaveInvoker};

/// Save invoker that counts calls and can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    /// Number of `save_all` calls observed so far.
    calls: AtomicUsize,
    /// When set, `save_all` reports a command failure instead of succeeding.
    fail: AtomicBool,
}

impl RecordingInvoker {
    /// Create a shareable recording invoker.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of `save_all` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make subsequent `save_all` calls fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl SaveInvoker for RecordingInvoker {
    fn save_all(&self) -> Result<(), SaveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Err(SaveError::CommandFailed {
                reason: "injected failure".into(),
            })
        } else {
            Ok(())
        }
    }
}

/// Save invoker that panics, for exercising the adapters' panic isolation.
#[derive(Debug, Default)]
pub struct PanickingInvoker;

impl SaveInvoker for PanickingInvoker {
    fn save_all(&self) -> Result<(), SaveError> {
        panic!("invoker panicked");
    }
}
