#![warn(missing_docs)]

//! focus-watcher: observe OS foreground-focus changes and feed them to the
//! blursave engine.
//!
//! The OS boundary is the [`FocusHook`] trait: a global notification source
//! with explicit acquire/release of subscription handles, parameterized by an
//! optional process-id filter and an "exclude own process" flag. A real host
//! supplies a platform implementation (a WinEvent hook, an NSWorkspace
//! observer, ...); [`SimHook`] is an in-process implementation for tests and
//! the sim binary.
//!
//! [`FocusWatcher`] is the only code that touches subscription registration.
//! It acquires two handles at startup:
//! - a cross-process subscription (excluding our own process) routed to
//!   [`Engine::other_process_focus_gained`],
//! - an own-process subscription routed to [`Engine::host_focus_gained`],
//!
//! and releases both exactly once at teardown. Registration failure on one
//! channel leaves that channel inactive and the other working; it never
//! aborts host startup.
//!
//! [`Engine::other_process_focus_gained`]: blursave_engine::Engine::other_process_focus_gained
//! [`Engine::host_focus_gained`]: blursave_engine::Engine::host_focus_gained

mod hook;
mod sim;
mod watcher;

pub use hook::{FocusChange, FocusHook, FocusSink, HookError, HookFilter, HookHandle, Pid};
pub use sim::SimHook;
pub use watcher::FocusWatcher;
