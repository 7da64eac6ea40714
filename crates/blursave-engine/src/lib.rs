#![warn(missing_docs)]

//! Core focus/workspace state machine for blursave.
//!
//! This crate holds the only real state in the system:
//! - [`Controller`]: a pure Mealy machine over two booleans (workspace open,
//!   host focused) that decides when a save should happen. No I/O, no locks,
//!   directly unit-testable.
//! - [`Engine`]: the thread-safe facade the adapters call into. It serializes
//!   access to the controller and invokes the host's save-all command through
//!   the [`SaveInvoker`] trait when the controller asks for one.
//!
//! The adapters (focus-watcher, workspace-watcher) translate OS and host
//! callbacks into plain method calls on [`Engine`]; nothing in this crate
//! knows about callback registration.

mod controller;
mod engine;
mod invoker;
pub mod test_support;

pub use controller::{Controller, Response};
pub use engine::Engine;
pub use invoker::{SaveError, SaveInvoker};
