//! The OS-facing subscription contract.

use std::sync::Arc;

use thiserror::Error;

/// Process identifier as reported by focus notifications.
pub type Pid = u32;

/// A single foreground-focus change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Process that now owns the foreground window.
    pub pid: Pid,
    /// Opaque OS identifier of the newly focused window.
    pub window: u64,
}

/// Selects which foreground-change notifications a subscription receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookFilter {
    /// Restrict delivery to this process, or all processes when `None`.
    pub pid: Option<Pid>,
    /// Suppress notifications originating from the subscriber's own process.
    pub skip_own_process: bool,
}

impl HookFilter {
    /// Deliver focus changes from every process except the subscriber's own.
    pub fn other_processes() -> Self {
        Self {
            pid: None,
            skip_own_process: true,
        }
    }

    /// Deliver focus changes for a single process only.
    pub fn own_process(pid: Pid) -> Self {
        Self {
            pid: Some(pid),
            skip_own_process: false,
        }
    }
}

/// Opaque token identifying an acquired subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle(u64);

impl HookHandle {
    /// Wrap a raw hook identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw hook identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback invoked by a hook for each matching focus change. May be called
/// on any thread the OS chooses.
pub type FocusSink = Arc<dyn Fn(FocusChange) + Send + Sync>;

/// Failure to register a focus subscription.
#[derive(Debug, Error)]
pub enum HookError {
    /// The OS refused to install the notification hook.
    #[error("hook registration denied: {reason}")]
    Denied {
        /// Platform-provided failure description.
        reason: String,
    },
}

/// Global foreground-focus notification source.
///
/// Implemented per target platform. Handles follow a strict acquire/release
/// discipline: each acquired handle is released exactly once at teardown, and
/// releasing a handle that was never acquired, or releasing one twice, must
/// be a no-op rather than fatal (host shutdown ordering is not guaranteed).
pub trait FocusHook: Send + Sync {
    /// Register `sink` for focus changes matching `filter`.
    fn acquire(&self, filter: HookFilter, sink: FocusSink) -> Result<HookHandle, HookError>;

    /// Release a previously acquired subscription. Unknown or already
    /// released handles are ignored.
    fn release(&self, handle: HookHandle);
}
