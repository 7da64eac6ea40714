//! Thread-safe facade over the controller.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    controller::{Controller, Response},
    invoker::SaveInvoker,
};

/// Serializes access to the [`Controller`] and executes save requests.
///
/// Cheap to clone; all clones share the same state. Entry points may be
/// called from any thread (OS focus notifications and host lifecycle
/// notifications arrive on threads we do not control). The verdict is
/// computed under the lock, the lock is dropped, and only then is the
/// invoker called, so no lock is ever held across an external call.
#[derive(Clone)]
pub struct Engine {
    /// Shared two-bit state machine.
    state: Arc<Mutex<Controller>>,
    /// Host collaborator that performs the actual save.
    invoker: Arc<dyn SaveInvoker>,
}

impl Engine {
    /// Create an engine with no workspace open. Use
    /// [`seed_workspace_open`](Self::seed_workspace_open) once the host's
    /// current workspace state is known.
    pub fn new(invoker: Arc<dyn SaveInvoker>) -> Self {
        Self {
            state: Arc::new(Mutex::new(Controller::new(false))),
            invoker,
        }
    }

    /// Set the workspace flag from the host's current state. Called once at
    /// startup, before lifecycle notifications start flowing; the host may
    /// already have a workspace loaded when we initialize.
    pub fn seed_workspace_open(&self, open: bool) {
        debug!(open, "seeding workspace state");
        let mut state = self.state.lock();
        if open {
            state.on_workspace_opened();
        } else {
            state.on_workspace_closing();
        }
    }

    /// A workspace was opened in the host.
    pub fn workspace_opened(&self) {
        info!("workspace opened");
        self.state.lock().on_workspace_opened();
    }

    /// The host is about to close its workspace.
    pub fn workspace_closing(&self) {
        info!("workspace closing");
        self.state.lock().on_workspace_closing();
    }

    /// The host's own window gained foreground focus.
    pub fn host_focus_gained(&self) {
        debug!("host gained focus");
        self.state.lock().on_host_focus_gained();
    }

    /// Another process's window gained foreground focus. Saves all documents
    /// if the host was focused with a workspace open.
    pub fn other_process_focus_gained(&self) {
        let response = self.state.lock().on_other_process_focus_gained();
        if response != Response::SaveAll {
            return;
        }
        info!("focus lost with workspace open; saving all documents");
        // Not retried on failure: the next focus-loss edge attempts the
        // next save.
        if let Err(err) = self.invoker.save_all() {
            warn!(error = %err, "save-all failed");
        }
    }

    /// Whether a workspace is currently open.
    pub fn workspace_open(&self) -> bool {
        self.state.lock().workspace_open()
    }

    /// Whether the host currently holds foreground focus.
    pub fn has_focus(&self) -> bool {
        self.state.lock().has_focus()
    }
}
