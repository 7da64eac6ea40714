//! Adapter that routes workspace lifecycle events into the engine.

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use blursave_engine::Engine;
use tracing::{error, warn};

use crate::host::{SubscriptionId, WorkspaceEvent, WorkspaceHost, WorkspaceSink};

/// Owns the lifecycle subscription and translates host callbacks into plain
/// method calls on [`Engine`].
pub struct WorkspaceWatcher {
    /// Host the subscription was registered with.
    host: Arc<dyn WorkspaceHost>,
    /// Lifecycle subscription, if registration succeeded.
    subscription: Option<SubscriptionId>,
}

impl WorkspaceWatcher {
    /// Seed `engine` with the host's current workspace state, then subscribe
    /// to lifecycle events.
    ///
    /// Seeding happens first: the host may already have a workspace loaded
    /// before this component initializes, and a focus loss arriving between
    /// seeding and subscription must still see the right state. A
    /// subscription failure is logged and leaves the seeded state frozen;
    /// it never aborts host startup.
    pub fn start(host: Arc<dyn WorkspaceHost>, engine: Engine) -> Self {
        engine.seed_workspace_open(host.is_workspace_open());

        let sink: WorkspaceSink = Arc::new(move |event| {
            guarded(event, || match event {
                WorkspaceEvent::Opened => engine.workspace_opened(),
                WorkspaceEvent::Closing => engine.workspace_closing(),
            });
        });
        let subscription = match host.subscribe(sink) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, "workspace notifications unavailable; state frozen at seeded value");
                None
            }
        };

        Self { host, subscription }
    }

    /// Remove the lifecycle subscription. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.host.unsubscribe(id);
        }
    }
}

impl Drop for WorkspaceWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run a handler, containing any panic so it never unwinds into the host's
/// event dispatch.
fn guarded<F: FnOnce()>(event: WorkspaceEvent, f: F) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        error!(?event, "panic in workspace handler; event dropped");
    }
}
