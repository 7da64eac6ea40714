#![warn(missing_docs)]

//! blursave: save all open documents when the editing host loses focus.
//!
//! A host embeds this by implementing three traits — [`FocusHook`] for OS
//! foreground-change notifications, [`WorkspaceHost`] for its
//! solution/project lifecycle, and [`SaveInvoker`] for its native "save all"
//! command — and constructing a [`Session`] at startup. The session is the
//! single explicit context object: it owns the engine and both watchers, and
//! releases every subscription at shutdown. There is no ambient global
//! state.

use std::sync::Arc;

pub use blursave_engine::{Controller, Engine, Response, SaveError, SaveInvoker};
pub use focus_watcher::{
    FocusChange, FocusHook, FocusSink, FocusWatcher, HookError, HookFilter, HookHandle, Pid,
    SimHook,
};
use tracing::info;
pub use workspace_watcher::{
    HostError, SimHost, SubscriptionId, WorkspaceEvent, WorkspaceHost, WorkspaceSink,
    WorkspaceWatcher,
};

/// A running save-on-focus-loss instance.
///
/// Activation wires the adapters to the engine; shutdown (or drop) releases
/// the focus hook handles and the workspace subscription. Shutdown is
/// idempotent and the releases are individually safe to repeat, so host
/// teardown ordering does not matter.
pub struct Session {
    /// Shared state machine facade.
    engine: Engine,
    /// Focus-change adapter owning the two hook handles.
    focus: FocusWatcher,
    /// Workspace lifecycle adapter owning its subscription.
    workspace: WorkspaceWatcher,
}

impl Session {
    /// Activate saving for the process identified by `own_pid`.
    ///
    /// Seeds the workspace state from `host` before any events flow, then
    /// registers the focus and lifecycle subscriptions. Registration
    /// failures degrade the corresponding channel and are logged; activation
    /// itself never fails.
    pub fn activate(
        hook: Arc<dyn FocusHook>,
        host: Arc<dyn WorkspaceHost>,
        invoker: Arc<dyn SaveInvoker>,
        own_pid: Pid,
    ) -> Self {
        info!(own_pid, "activating");
        let engine = Engine::new(invoker);
        let workspace = WorkspaceWatcher::start(host, engine.clone());
        let focus = FocusWatcher::start(hook, own_pid, engine.clone());
        info!("activated");
        Self {
            engine,
            focus,
            workspace,
        }
    }

    /// The shared engine, mainly useful for inspecting state in tests.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Release all subscriptions. Safe to call more than once; drop calls it
    /// as a safety net.
    pub fn shutdown(&mut self) {
        info!("shutting down");
        self.focus.shutdown();
        self.workspace.shutdown();
    }
}
