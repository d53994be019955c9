//! Error types for the session coordinator
//!
//! Everything here is recoverable: selection and move errors are absorbed
//! where they occur, assist errors are reported and the session continues
//! in human-only mode. Only rules-engine faults or bootstrap failures
//! (anyhow, at the embedding boundary) terminate a session.

use crate::board::BoardCell;
use crate::engine::RejectReason;

/// Errors that can occur while coordinating a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Clicked cell has no selectable piece
    #[error("invalid selection at {cell}")]
    InvalidSelection { cell: BoardCell },

    /// Rules engine rejected an attempted move
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: BoardCell,
        to: BoardCell,
        reason: RejectReason,
    },

    /// Suggestion engine failed or timed out
    #[error("assist unavailable: {message}")]
    AssistUnavailable { message: String },

    /// Suggestion engine proposed a move the rules engine rejects
    #[error("engine desync: suggested move {from} -> {to} rejected by rules engine")]
    EngineDesync { from: BoardCell, to: BoardCell },
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
