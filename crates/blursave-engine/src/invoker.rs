//! Contract for the host's bulk-save command.

use thiserror::Error;

/// Error reported by a [`SaveInvoker`] implementation.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The host accepted the command but the save itself failed.
    #[error("save-all command failed: {reason}")]
    CommandFailed {
        /// Host-provided failure description.
        reason: String,
    },
}

/// Executes the host's native "save all open documents" command.
///
/// Implementations must be safe to call when nothing is dirty (an idempotent
/// no-op) and must report failures through [`SaveError`] rather than
/// swallowing them. The engine calls this synchronously on whatever thread
/// the triggering focus event arrived on, with no engine lock held.
pub trait SaveInvoker: Send + Sync {
    /// Save every open document in the host.
    fn save_all(&self) -> Result<(), SaveError>;
}
