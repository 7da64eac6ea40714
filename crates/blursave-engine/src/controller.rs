//! Pure focus/workspace state machine.

/// Result of handling a focus or workspace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// No action required; the transition was silent.
    Ok,
    /// Save all open documents now. Emitted at most once per focus-loss edge.
    SaveAll,
}

/// Tracks whether a workspace is open and whether the host holds foreground
/// focus, and decides when a save should fire.
///
/// This is a Mealy machine: the save request is tied to the transition out of
/// Open·Focused, not to the state itself. Emitting clears `has_focus`, so
/// repeated "other process focused" notifications while already unfocused
/// (the OS hook can legitimately deliver these when focus bounces between two
/// other windows) produce no further saves until the host regains focus.
#[derive(Debug)]
pub struct Controller {
    /// True between a workspace-opened event and the next workspace-closing
    /// event.
    workspace_open: bool,
    /// True when the host's own window last received foreground focus.
    has_focus: bool,
}

impl Controller {
    /// Create a controller. `workspace_open` reflects the host's current
    /// workspace state at construction time; the host may start with one
    /// already loaded. Initial focus is never assumed, only observed.
    pub fn new(workspace_open: bool) -> Self {
        Self {
            workspace_open,
            has_focus: false,
        }
    }

    /// A workspace was opened in the host.
    pub fn on_workspace_opened(&mut self) -> Response {
        self.workspace_open = true;
        Response::Ok
    }

    /// The host is about to close its workspace.
    pub fn on_workspace_closing(&mut self) -> Response {
        self.workspace_open = false;
        Response::Ok
    }

    /// The host's own window gained foreground focus.
    pub fn on_host_focus_gained(&mut self) -> Response {
        self.has_focus = true;
        Response::Ok
    }

    /// Another process's window gained foreground focus.
    pub fn on_other_process_focus_gained(&mut self) -> Response {
        if self.has_focus && self.workspace_open {
            self.has_focus = false;
            Response::SaveAll
        } else {
            Response::Ok
        }
    }

    /// Whether a workspace is currently open.
    pub fn workspace_open(&self) -> bool {
        self.workspace_open
    }

    /// Whether the host currently holds foreground focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }
}
