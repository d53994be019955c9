//! Move resolution
//!
//! Thin, side-effecting adapter between a completed (from, to) pair and
//! the rules engine. Performs no rule logic of its own. Contract: a move
//! the engine rejected is never recorded, and an applied move always lands
//! in the history together with the snapshot taken *after* it.

use crate::board::BoardCell;
use crate::engine::{ApplyResult, RejectReason, RulesEngine};
use crate::session::history::{HistoryLog, MoveRecord};
use chrono::Utc;
use tracing::{debug, info};

/// Outcome of resolving a move attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Applied(MoveRecord),
    Rejected(RejectReason),
}

/// Ask the rules engine to apply a move; on success record it.
pub fn attempt_move<R: RulesEngine>(
    engine: &mut R,
    history: &mut HistoryLog,
    from: BoardCell,
    to: BoardCell,
) -> MoveOutcome {
    let side = engine.side_to_move();
    match engine.apply_move(from, to) {
        ApplyResult::Applied => {
            let record = MoveRecord {
                from,
                to,
                side,
                ordinal: history.next_ordinal(),
                at: Utc::now(),
            };
            let snapshot_after = engine.snapshot();
            info!("[SESSION] move {record} applied by {side:?}");
            history.append(record.clone(), snapshot_after);
            MoveOutcome::Applied(record)
        }
        ApplyResult::Rejected(reason) => {
            debug!("[SESSION] move {from} -> {to} rejected: {reason}");
            MoveOutcome::Rejected(reason)
        }
    }
}
