//! Move history
//!
//! Append-only record of play: the initial position plus one entry per
//! applied move, each carrying the snapshot *after* the move. Rejected
//! attempts never reach this log. Read by the move-list panel and by
//! replay/export collaborators; only the resolver writes to it.

use crate::board::{BoardCell, BoardSnapshot, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical record of one applied move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: BoardCell,
    pub to: BoardCell,
    /// The side that made the move.
    pub side: Side,
    /// Position in the game, starting at 0.
    pub ordinal: u32,
    pub at: DateTime<Utc>,
}

impl fmt::Display for MoveRecord {
    /// Four-digit column/row notation, e.g. `0001` for (0,0) -> (0,1).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.from.col, self.from.row, self.to.col, self.to.row
        )
    }
}

/// One applied move together with the position it produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record: MoveRecord,
    pub snapshot_after: BoardSnapshot,
}

/// Append-only, chronologically ordered history of the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    initial: BoardSnapshot,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new(initial: BoardSnapshot) -> Self {
        Self {
            initial,
            entries: Vec::new(),
        }
    }

    pub fn initial_snapshot(&self) -> &BoardSnapshot {
        &self.initial
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordinal the next applied move will carry.
    pub fn next_ordinal(&self) -> u32 {
        self.entries.len() as u32
    }

    pub(crate) fn append(&mut self, record: MoveRecord, snapshot_after: BoardSnapshot) {
        self.entries.push(HistoryEntry {
            record,
            snapshot_after,
        });
    }

    /// Full game record in move notation, one move per line.
    pub fn notation(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.record.to_string());
            out.push('\n');
        }
        out
    }
}
