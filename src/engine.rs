//! Board rules engine contract
//!
//! The session coordinator never implements move legality, turn ownership
//! or win detection itself; it consumes them through this trait. Any
//! xiangqi rules implementation (or a scripted fake in tests) plugs in
//! here.

use crate::board::{BoardCell, BoardSnapshot, PieceRef, Side, Winner};
use std::fmt;

/// Why the rules engine refused a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Move is not legal for the piece in the current position
    NotLegal,
    /// Source piece does not belong to the side to move
    NotTurn,
    /// Source or destination is off the board
    OutOfBounds,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::NotLegal => "not legal",
            RejectReason::NotTurn => "not this side's turn",
            RejectReason::OutOfBounds => "out of bounds",
        };
        f.write_str(text)
    }
}

/// Result of asking the rules engine to apply a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    /// The engine applied the move and advanced the turn
    Applied,
    Rejected(RejectReason),
}

/// The contract the coordinator consumes from the board rules engine.
///
/// Implementations own all board state; the session only holds opaque
/// `PieceRef` handles and `BoardSnapshot` captures obtained from here.
pub trait RulesEngine {
    /// Piece at a cell, if any. Out-of-range cells return `None`.
    fn piece_at(&self, cell: BoardCell) -> Option<PieceRef>;

    /// Whose turn it currently is.
    fn side_to_move(&self) -> Side;

    /// Validate and apply a move, advancing the turn on success.
    fn apply_move(&mut self, from: BoardCell, to: BoardCell) -> ApplyResult;

    /// Terminal result, once the game has ended.
    fn game_over(&self) -> Option<Winner>;

    /// Immutable capture of the current position.
    fn snapshot(&self) -> BoardSnapshot;
}
