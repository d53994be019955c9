//! Session loop
//!
//! Owns all board-adjacent state and drives one iteration per input/render
//! tick: drain events in arrival order, route them through selection and
//! move resolution, service the assist coordinator, then check for game
//! end. Single-threaded and non-blocking throughout; the suggestion
//! engine's worker is the only thing running out-of-line.

pub mod events;
pub mod history;
pub mod resolver;
pub mod selection;

use crate::assist::suggester::SuggestionEngine;
use crate::assist::{AssistCoordinator, AssistState};
use crate::board::coordinates::CoordinateMapper;
use crate::board::{BoardCell, Winner};
use crate::config::SessionConfig;
use crate::engine::RulesEngine;
use crate::error::SessionError;
use self::events::{classify_pointer, ClickTarget, InputEvent};
use self::history::HistoryLog;
use self::resolver::{attempt_move, MoveOutcome};
use self::selection::{ClickAction, SelectionState};
use tracing::{debug, error, info, warn};

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// User closed the window
    Quit,
    /// Rules engine reported a terminal position
    GameOver(Winner),
    /// A component or the embedder cleared the continue flag
    Stopped,
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Ended(SessionEnd),
}

/// One interactive game session: selection, history, assist and the
/// continue flag, owned together and mutated only from the loop's thread.
pub struct Session<R: RulesEngine, S: SuggestionEngine> {
    config: SessionConfig,
    mapper: CoordinateMapper,
    engine: R,
    suggester: S,
    selection: SelectionState,
    history: HistoryLog,
    assist: AssistCoordinator,
    keep_running: bool,
    finished: Option<SessionEnd>,
    last_assist_error: Option<SessionError>,
}

impl<R: RulesEngine, S: SuggestionEngine> Session<R, S> {
    pub fn new(config: SessionConfig, engine: R, suggester: S) -> Self {
        let mapper = CoordinateMapper::new(&config);
        let history = HistoryLog::new(engine.snapshot());
        let assist = AssistCoordinator::new(config.assist_timeout());
        Self {
            config,
            mapper,
            engine,
            suggester,
            selection: SelectionState::default(),
            history,
            assist,
            keep_running: true,
            finished: None,
            last_assist_error: None,
        }
    }

    // --- output surface for the rendering collaborator ---

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub fn suggester(&self) -> &S {
        &self.suggester
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn assist_state(&self) -> AssistState {
        self.assist.state()
    }

    /// Most recent assist failure, for a UI hint. Cleared on read.
    pub fn take_assist_error(&mut self) -> Option<SessionError> {
        self.last_assist_error.take()
    }

    /// Clear the continue flag; the session ends gracefully on the next
    /// tick boundary.
    pub fn request_stop(&mut self) {
        self.keep_running = false;
    }

    /// Drive one tick: process `events` in arrival order, service the
    /// assist coordinator, then check for game end.
    pub fn tick(&mut self, events: impl IntoIterator<Item = InputEvent>) -> TickStatus {
        if let Some(end) = self.finished {
            return TickStatus::Ended(end);
        }

        for event in events {
            match event {
                InputEvent::Quit => {
                    info!("[SESSION] quit requested");
                    return self.finish(SessionEnd::Quit);
                }
                InputEvent::PointerDown { x, y } => self.handle_pointer(x, y),
            }
        }

        self.service_assist();

        if let Some(winner) = self.engine.game_over() {
            info!("[SESSION] game over, winner is {winner:?}");
            return self.finish(SessionEnd::GameOver(winner));
        }
        if !self.keep_running {
            info!("[SESSION] continue flag cleared, stopping");
            return self.finish(SessionEnd::Stopped);
        }
        TickStatus::Running
    }

    fn finish(&mut self, end: SessionEnd) -> TickStatus {
        // Detach from any in-flight suggestion; a late result is discarded
        // on the worker side.
        self.assist.abort(&mut self.suggester);
        self.selection.clear();
        if !self.history.is_empty() {
            info!("[SESSION] game record:\n{}", self.history.notation());
        }
        self.finished = Some(end);
        TickStatus::Ended(end)
    }

    fn handle_pointer(&mut self, x: i32, y: i32) {
        match classify_pointer(&self.config, &self.mapper, x, y) {
            ClickTarget::AssistButton => {
                info!("[INPUT] assist button pressed");
                let snapshot = self.engine.snapshot();
                self.assist.dispatch(&mut self.suggester, &snapshot);
            }
            ClickTarget::Board(cell) => self.handle_board_click(cell),
        }
    }

    fn handle_board_click(&mut self, cell: BoardCell) {
        match self.selection.handle_click(&self.engine, cell) {
            ClickAction::Selected(piece) => {
                debug!("[INPUT] selected {:?} at {}", piece.kind, piece.cell);
            }
            ClickAction::Reselected(piece) => {
                debug!("[INPUT] selection switched to {:?} at {}", piece.kind, piece.cell);
            }
            ClickAction::Ignored(result) => {
                debug!("[INPUT] click at {cell} ignored: {result:?}");
            }
            ClickAction::MoveAttempt { from, to } => {
                match attempt_move(&mut self.engine, &mut self.history, from, to) {
                    MoveOutcome::Applied(_) => {}
                    MoveOutcome::Rejected(reason) => {
                        warn!("[INPUT] move {from} -> {to} rejected: {reason}");
                    }
                }
            }
        }
    }

    /// Poll the assist coordinator and apply a completed suggestion
    /// through the same resolver path as a human move.
    fn service_assist(&mut self) {
        self.assist.poll(&mut self.suggester);

        if let Some(suggestion) = self.assist.take_completed() {
            // The suggested move replaces whatever the user had in hand.
            self.selection.clear();
            match attempt_move(
                &mut self.engine,
                &mut self.history,
                suggestion.from,
                suggestion.to,
            ) {
                MoveOutcome::Applied(record) => {
                    info!("[ASSIST] applied suggested move {record}");
                }
                MoveOutcome::Rejected(reason) => {
                    error!(
                        "[ASSIST] rules engine rejected suggested move {} -> {} ({reason}); \
                         suggestion engine is out of sync",
                        suggestion.from, suggestion.to
                    );
                    self.assist.fail(SessionError::EngineDesync {
                        from: suggestion.from,
                        to: suggestion.to,
                    });
                }
            }
        }

        if let Some(err) = self.assist.take_failure() {
            warn!("[ASSIST] {err}");
            self.last_assist_error = Some(err);
        }
    }
}
