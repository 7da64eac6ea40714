//! In-process host implementation for tests and the sim binary.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::host::{HostError, SubscriptionId, WorkspaceEvent, WorkspaceHost, WorkspaceSink};

/// Mutable host state behind one lock.
struct Inner {
    /// Whether a workspace is currently open.
    open: bool,
    /// Next subscription id to hand out.
    next: u64,
    /// Live subscriptions keyed by raw id.
    subs: HashMap<u64, WorkspaceSink>,
    /// When set, `subscribe` fails.
    deny: bool,
}

/// A fully in-process [`WorkspaceHost`]: lifecycle events are injected with
/// [`open_workspace`](Self::open_workspace) and
/// [`close_workspace`](Self::close_workspace) and delivered synchronously on
/// the injecting thread.
pub struct SimHost {
    /// Host state.
    inner: Mutex<Inner>,
}

impl SimHost {
    /// Create a host; `open` is the workspace state it starts in.
    pub fn new(open: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                open,
                next: 1,
                subs: HashMap::new(),
                deny: false,
            }),
        })
    }

    /// Make subsequent `subscribe` calls fail (or succeed again).
    pub fn set_deny(&self, deny: bool) {
        self.inner.lock().deny = deny;
    }

    /// Open a workspace and notify subscribers. The state flips before
    /// delivery: a subscriber querying the host during the callback sees the
    /// workspace as open.
    pub fn open_workspace(&self) {
        self.inner.lock().open = true;
        self.dispatch(WorkspaceEvent::Opened);
    }

    /// Close the workspace, notifying subscribers before the state flips,
    /// the way a host announces "about to close".
    pub fn close_workspace(&self) {
        self.dispatch(WorkspaceEvent::Closing);
        self.inner.lock().open = false;
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.inner.lock().subs.len()
    }

    /// Deliver `event` to every subscriber. No lock is held during delivery,
    /// so sinks may query the host.
    fn dispatch(&self, event: WorkspaceEvent) {
        let sinks: Vec<WorkspaceSink> = self.inner.lock().subs.values().cloned().collect();
        for sink in sinks {
            sink(event);
        }
    }
}

impl WorkspaceHost for SimHost {
    fn is_workspace_open(&self) -> bool {
        self.inner.lock().open
    }

    fn subscribe(&self, sink: WorkspaceSink) -> Result<SubscriptionId, HostError> {
        let mut inner = self.inner.lock();
        if inner.deny {
            return Err(HostError::SubscribeFailed {
                reason: "denied by sim".into(),
            });
        }
        let raw = inner.next;
        inner.next += 1;
        inner.subs.insert(raw, sink);
        Ok(SubscriptionId::new(raw))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        // Unknown ids are ignored; unsubscribe is idempotent.
        self.inner.lock().subs.remove(&id.raw());
    }
}
