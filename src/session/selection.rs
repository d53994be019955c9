//! Piece selection
//!
//! Tracks the piece the user currently has picked up. At most one piece is
//! selected at a time, and only a piece belonging to the side to move can
//! be picked up. A click while something is selected either switches the
//! selection (same-side piece) or becomes a move attempt; either way the
//! old selection is gone.

use crate::board::{BoardCell, PieceRef};
use crate::engine::RulesEngine;
use tracing::debug;

/// What a selection attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    /// Piece picked up
    Selected(PieceRef),
    /// Clicked cell is empty; nothing changed
    NoPiece,
    /// Piece belongs to the waiting side; nothing changed
    WrongSide,
}

/// How a board click was interpreted, given the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// First selection of a piece
    Selected(PieceRef),
    /// Selection switched to another same-side piece; no move attempted
    Reselected(PieceRef),
    /// The selected piece was asked to move; selection is already cleared
    MoveAttempt { from: BoardCell, to: BoardCell },
    /// Click did not change anything (empty cell / wrong side, no selection)
    Ignored(SelectionResult),
}

/// The "picked up piece" state of the session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionState {
    selected: Option<PieceRef>,
}

impl SelectionState {
    /// Currently selected piece, for the highlight on the output surface.
    pub fn selected(&self) -> Option<PieceRef> {
        self.selected
    }

    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            debug!("[INPUT] selection cleared");
        }
    }

    /// Try to pick up the piece at `cell`. Only a piece of the side to
    /// move can be selected; anything else leaves the state untouched.
    pub fn try_select<R: RulesEngine>(&mut self, engine: &R, cell: BoardCell) -> SelectionResult {
        match engine.piece_at(cell) {
            None => SelectionResult::NoPiece,
            Some(piece) if piece.side != engine.side_to_move() => SelectionResult::WrongSide,
            Some(piece) => {
                self.selected = Some(piece);
                SelectionResult::Selected(piece)
            }
        }
    }

    /// Interpret a board click against the current selection.
    ///
    /// With nothing selected this is a plain selection attempt. With a
    /// piece in hand, clicking another piece of the mover's side switches
    /// the selection; any other cell becomes a move attempt, and the
    /// selection is cleared before the outcome is even known.
    pub fn handle_click<R: RulesEngine>(&mut self, engine: &R, cell: BoardCell) -> ClickAction {
        let Some(current) = self.selected else {
            return match self.try_select(engine, cell) {
                SelectionResult::Selected(piece) => ClickAction::Selected(piece),
                other => ClickAction::Ignored(other),
            };
        };

        if let Some(piece) = engine.piece_at(cell) {
            if piece.side == engine.side_to_move() {
                self.selected = Some(piece);
                return ClickAction::Reselected(piece);
            }
        }

        self.selected = None;
        ClickAction::MoveAttempt {
            from: current.cell,
            to: cell,
        }
    }
}
