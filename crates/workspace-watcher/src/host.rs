//! The host-facing subscription contract.

use std::sync::Arc;

use thiserror::Error;

/// A workspace lifecycle notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// A workspace was opened.
    Opened,
    /// The current workspace is about to close.
    Closing,
}

/// Opaque token identifying a lifecycle subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw subscription identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw subscription identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback invoked by the host for each lifecycle event. May be called on
/// any thread the host chooses.
pub type WorkspaceSink = Arc<dyn Fn(WorkspaceEvent) + Send + Sync>;

/// Failure to register a lifecycle subscription.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host refused the subscription.
    #[error("workspace subscription failed: {reason}")]
    SubscribeFailed {
        /// Host-provided failure description.
        reason: String,
    },
}

/// The host's workspace lifecycle surface.
///
/// `unsubscribe` follows the same discipline as hook release: unknown or
/// already removed subscriptions are ignored.
pub trait WorkspaceHost: Send + Sync {
    /// Whether a workspace is open right now.
    fn is_workspace_open(&self) -> bool;

    /// Register `sink` for lifecycle events.
    fn subscribe(&self, sink: WorkspaceSink) -> Result<SubscriptionId, HostError>;

    /// Remove a previously registered subscription.
    fn unsubscribe(&self, id: SubscriptionId);
}
