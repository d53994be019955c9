//! Board-facing value types
//!
//! These are the types that cross the boundary between the session
//! coordinator and its collaborators: cells, sides, piece handles and
//! position snapshots. The session never inspects the inside of a
//! position; the rules engine owns all board semantics.

pub mod coordinates;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns on a xiangqi board.
pub const BOARD_COLS: i32 = 9;
/// Number of rows on a xiangqi board.
pub const BOARD_ROWS: i32 = 10;

/// A board coordinate: column 0..9, row 0..10, row 0 at the red edge.
///
/// Out-of-range cells can be constructed (the coordinate mapper produces
/// them for clicks outside the window) and are rejected by whoever
/// consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCell {
    pub col: i32,
    pub row: i32,
}

impl BoardCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether the cell lies on the 9x10 grid.
    pub fn in_bounds(&self) -> bool {
        (0..BOARD_COLS).contains(&self.col) && (0..BOARD_ROWS).contains(&self.row)
    }
}

impl fmt::Display for BoardCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Which player a piece or turn belongs to. Red moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

/// Piece kinds, used only for the asset-key lookup on the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

/// Asset keys by (side, kind), in `PieceKind` declaration order.
/// Matches the sprite naming scheme of the art pack (RK.GIF, BP.GIF, ...).
const ASSET_KEYS: [[&str; 7]; 2] = [
    ["RK", "RA", "RB", "RN", "RR", "RC", "RP"],
    ["BK", "BA", "BB", "BN", "BR", "BC", "BP"],
];

impl PieceKind {
    /// Static capability table mapping a piece to its sprite key.
    pub fn asset_key(self, side: Side) -> &'static str {
        let row = match side {
            Side::Red => 0,
            Side::Black => 1,
        };
        ASSET_KEYS[row][self as usize]
    }
}

/// Handle to a piece owned by the rules engine. The session reads it for
/// selection and highlighting but never mutates a piece directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRef {
    pub side: Side,
    pub kind: PieceKind,
    pub cell: BoardCell,
}

/// Immutable capture of full board state at one instant, produced by the
/// rules engine. Opaque to the session; it is only carried to the
/// suggestion engine and into the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot(String);

impl BoardSnapshot {
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Terminal game result reported by the rules engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Red,
    Black,
    Draw,
}
