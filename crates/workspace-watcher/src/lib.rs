#![warn(missing_docs)]

//! workspace-watcher: observe the host's workspace lifecycle and feed it to
//! the blursave engine.
//!
//! The host boundary is the [`WorkspaceHost`] trait: opened/closing
//! notifications plus a query for the current workspace state, which seeds
//! the engine at startup (the host may already have a workspace loaded
//! before we initialize). [`SimHost`] is an in-process implementation for
//! tests and the sim binary; a real host wraps its native solution/project
//! events.

mod host;
mod sim;
mod watcher;

pub use host::{HostError, SubscriptionId, WorkspaceEvent, WorkspaceHost, WorkspaceSink};
pub use sim::SimHost;
pub use watcher::WorkspaceWatcher;
