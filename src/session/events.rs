//! Input events and click classification
//!
//! The windowing collaborator hands the session a queue of raw events;
//! only quit and primary pointer-down are in scope. A pointer-down is
//! classified by pixel position into either the assist button or a board
//! cell (possibly out of range, which downstream handling rejects).

use crate::board::coordinates::CoordinateMapper;
use crate::board::BoardCell;
use crate::config::SessionConfig;
use serde::{Deserialize, Serialize};

/// Raw event from the input surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    PointerDown { x: i32, y: i32 },
}

/// Where a pointer-down landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClickTarget {
    AssistButton,
    Board(BoardCell),
}

pub(crate) fn classify_pointer(
    config: &SessionConfig,
    mapper: &CoordinateMapper,
    x: i32,
    y: i32,
) -> ClickTarget {
    if config.assist_button.contains(x, y) {
        ClickTarget::AssistButton
    } else {
        ClickTarget::Board(mapper.to_board_cell(x, y))
    }
}
