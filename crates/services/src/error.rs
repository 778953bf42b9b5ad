//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by the session runners.
///
/// Persistence problems during a run are reported to the user and logged, not
/// returned; only failures that make the run itself impossible end up here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no verbs available for session")]
    Empty,
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
