//! Error types for the board engine

use crate::types::CardId;
use std::fmt;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Why the remote store refused a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    /// The card no longer exists (deleted concurrently)
    NotFound,
    /// The request referenced stale data (e.g. the card already left the
    /// claimed source stage)
    InvalidTarget,
}

impl fmt::Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectKind::NotFound => f.write_str("not_found"),
            RejectKind::InvalidTarget => f.write_str("invalid_target"),
        }
    }
}

/// Errors that can occur in the board engine.
///
/// Every failure resolves to a rollback of the visible board plus one of
/// these values; nothing in this subsystem leaves the board inconsistent
/// with its ordering invariant.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A fetched board violates the ordering invariant. Fatal to that fetch
    /// only; the last good board is kept.
    #[error("malformed board: {message}")]
    MalformedBoard { message: String },

    /// Card not present on the current board
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// The remote store refused the move
    #[error("reorder rejected ({kind}): {message}")]
    Rejected { kind: RejectKind, message: String },

    /// Network-level failure talking to the remote store
    #[error("transient failure: {message}")]
    Transient { message: String },
}

impl BoardError {
    /// Create a malformed-board error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBoard {
            message: message.into(),
        }
    }

    /// Create a card-not-found error
    pub fn card_not_found(id: &CardId) -> Self {
        Self::CardNotFound { id: id.to_string() }
    }

    /// Create a rejection error
    pub fn rejected(kind: RejectKind, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// Create a transient error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Network-level failures the user may retry by repeating the gesture.
    /// The engine itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
