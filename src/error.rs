//! Errors surfaced by the history core.

use thiserror::Error;

/// Failures of the persistence backend behind the history store.
///
/// Both kinds are recoverable: the store leaves its snapshot untouched and the
/// caller decides how to tell the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The backend could not produce the stored history.
    #[error("Failed to read history: {0}")]
    PersistenceRead(String),

    /// The backend could not store the new history.
    #[error("Failed to write history: {0}")]
    PersistenceWrite(String),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
