//! Session Flow Integration Tests
//!
//! Full-session scenarios driven through `Session::tick`:
//! - Selection and move resolution against a scripted rules engine
//! - History invariants (append only on applied moves)
//! - Assist round trip, timeout, desync and single-flight
//! - Session termination (quit, game over)

use std::collections::{HashMap, HashSet, VecDeque};

use xiangqi_session::{
    ApplyResult, BoardCell, BoardSnapshot, InputEvent, PieceKind, PieceRef, RejectReason,
    RequestHandle, RulesEngine, Session, SessionConfig, SessionEnd, SessionError, Side,
    SuggestionEngine, SuggestionPoll, TickStatus, Winner,
};

// ============================================================================
// Scripted collaborators
// ============================================================================

/// Rules engine fake: pieces on a map, an allow-list of legal moves, and an
/// optional scripted winner.
struct FakeRules {
    pieces: HashMap<BoardCell, PieceRef>,
    side: Side,
    legal: HashSet<(BoardCell, BoardCell)>,
    winner: Option<Winner>,
    version: u32,
}

impl FakeRules {
    fn new() -> Self {
        Self {
            pieces: HashMap::new(),
            side: Side::Red,
            legal: HashSet::new(),
            winner: None,
            version: 0,
        }
    }

    fn with_piece(mut self, side: Side, kind: PieceKind, col: i32, row: i32) -> Self {
        let cell = BoardCell::new(col, row);
        self.pieces.insert(cell, PieceRef { side, kind, cell });
        self
    }

    fn allowing(mut self, from: (i32, i32), to: (i32, i32)) -> Self {
        self.legal.insert((
            BoardCell::new(from.0, from.1),
            BoardCell::new(to.0, to.1),
        ));
        self
    }
}

impl RulesEngine for FakeRules {
    fn piece_at(&self, cell: BoardCell) -> Option<PieceRef> {
        self.pieces.get(&cell).copied()
    }

    fn side_to_move(&self) -> Side {
        self.side
    }

    fn apply_move(&mut self, from: BoardCell, to: BoardCell) -> ApplyResult {
        if !from.in_bounds() || !to.in_bounds() {
            return ApplyResult::Rejected(RejectReason::OutOfBounds);
        }
        let Some(piece) = self.pieces.get(&from).copied() else {
            return ApplyResult::Rejected(RejectReason::NotLegal);
        };
        if piece.side != self.side {
            return ApplyResult::Rejected(RejectReason::NotTurn);
        }
        if !self.legal.contains(&(from, to)) {
            return ApplyResult::Rejected(RejectReason::NotLegal);
        }
        self.pieces.remove(&from);
        self.pieces.insert(to, PieceRef { cell: to, ..piece });
        self.side = self.side.opponent();
        self.version += 1;
        ApplyResult::Applied
    }

    fn game_over(&self) -> Option<Winner> {
        self.winner
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(format!("fake:{}", self.version))
    }
}

/// Suggestion engine fake that replays scripted poll results and counts
/// dispatches and abandons.
struct FakeSuggester {
    script: VecDeque<SuggestionPoll>,
    requests: u32,
    abandoned: u32,
    next_id: u64,
}

impl FakeSuggester {
    fn new(script: impl IntoIterator<Item = SuggestionPoll>) -> Self {
        Self {
            script: script.into_iter().collect(),
            requests: 0,
            abandoned: 0,
            next_id: 0,
        }
    }
}

impl SuggestionEngine for FakeSuggester {
    fn request_move(&mut self, _snapshot: &BoardSnapshot) -> RequestHandle {
        self.requests += 1;
        self.next_id += 1;
        RequestHandle::new(self.next_id)
    }

    fn poll(&mut self, _handle: RequestHandle) -> SuggestionPoll {
        self.script.pop_front().unwrap_or(SuggestionPoll::Pending)
    }

    fn abandon(&mut self, _handle: RequestHandle) {
        self.abandoned += 1;
    }
}

fn suggested(from: (i32, i32), to: (i32, i32)) -> SuggestionPoll {
    SuggestionPoll::Move(xiangqi_session::SuggestedMove {
        from: BoardCell::new(from.0, from.1),
        to: BoardCell::new(to.0, to.1),
    })
}

/// Pixel position of a cell's top-left corner, for synthesizing clicks.
fn click(session_config: &SessionConfig, col: i32, row: i32) -> InputEvent {
    let cell = session_config.cell_size;
    InputEvent::PointerDown {
        x: col * cell + cell / 2,
        y: (session_config.board_rows - 1 - row) * cell + cell / 2,
    }
}

fn assist_click() -> InputEvent {
    InputEvent::PointerDown { x: 750, y: 30 }
}

// ============================================================================
// Selection scenarios
// ============================================================================

#[test]
fn empty_cell_click_changes_nothing() {
    let rules = FakeRules::new();
    let config = SessionConfig::default();
    let event = click(&config, 4, 4);
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    assert_eq!(session.tick([event]), TickStatus::Running);
    assert!(session.selection().selected().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn wrong_side_piece_cannot_be_picked_up() {
    let rules = FakeRules::new().with_piece(Side::Black, PieceKind::Soldier, 4, 6);
    let config = SessionConfig::default();
    let event = click(&config, 4, 6);
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    session.tick([event]);
    assert!(session.selection().selected().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn reselect_switches_without_moving() {
    let rules = FakeRules::new()
        .with_piece(Side::Red, PieceKind::Chariot, 0, 0)
        .with_piece(Side::Red, PieceKind::Cannon, 1, 2);
    let config = SessionConfig::default();
    let first = click(&config, 0, 0);
    let second = click(&config, 1, 2);
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    session.tick([first, second]);

    assert_eq!(
        session.selection().selected().map(|p| p.cell),
        Some(BoardCell::new(1, 2))
    );
    assert!(session.history().is_empty());
}

// ============================================================================
// Move resolution scenarios
// ============================================================================

#[test]
fn legal_move_is_recorded_and_selection_resets() {
    let rules = FakeRules::new()
        .with_piece(Side::Red, PieceKind::Chariot, 0, 0)
        .allowing((0, 0), (0, 1));
    let config = SessionConfig::default();
    let select = click(&config, 0, 0);
    let target = click(&config, 0, 1);
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    assert_eq!(session.tick([select, target]), TickStatus::Running);

    assert_eq!(session.history().len(), 1);
    let entry = session.history().last().expect("one history entry");
    assert_eq!(entry.record.from, BoardCell::new(0, 0));
    assert_eq!(entry.record.to, BoardCell::new(0, 1));
    assert_eq!(entry.record.side, Side::Red);
    assert_eq!(entry.record.to_string(), "0001");
    assert!(session.selection().selected().is_none());
    assert_eq!(session.engine().side_to_move(), Side::Black);
}

#[test]
fn rejected_move_clears_selection_and_keeps_history() {
    let rules = FakeRules::new().with_piece(Side::Red, PieceKind::Chariot, 0, 0);
    let config = SessionConfig::default();
    let select = click(&config, 0, 0);
    let target = click(&config, 5, 5);
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    session.tick([select, target]);

    assert!(session.history().is_empty());
    assert!(session.selection().selected().is_none());
    assert_eq!(session.engine().side_to_move(), Side::Red);
}

#[test]
fn events_in_one_tick_process_in_arrival_order() {
    let rules = FakeRules::new()
        .with_piece(Side::Red, PieceKind::Soldier, 0, 3)
        .with_piece(Side::Black, PieceKind::Soldier, 0, 6)
        .allowing((0, 3), (0, 4))
        .allowing((0, 6), (0, 5));
    let config = SessionConfig::default();
    let events = [
        click(&config, 0, 3),
        click(&config, 0, 4),
        click(&config, 0, 6),
        click(&config, 0, 5),
    ];
    let mut session = Session::new(config, rules, FakeSuggester::new([]));

    session.tick(events);

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().entries()[0].record.to_string(), "0304");
    assert_eq!(session.history().entries()[1].record.to_string(), "0605");
}

// ============================================================================
// Assist scenarios
// ============================================================================

#[test]
fn assist_round_trip_applies_and_returns_to_idle() {
    let rules = FakeRules::new()
        .with_piece(Side::Red, PieceKind::Chariot, 0, 0)
        .allowing((0, 0), (0, 1));
    let suggester = FakeSuggester::new([suggested((0, 0), (0, 1))]);
    let mut session = Session::new(SessionConfig::default(), rules, suggester);

    assert_eq!(session.tick([assist_click()]), TickStatus::Running);

    assert_eq!(session.history().len(), 1);
    let entry = session.history().last().expect("assist move recorded");
    assert_eq!(entry.record.from, BoardCell::new(0, 0));
    assert_eq!(entry.record.to, BoardCell::new(0, 1));
    assert_eq!(
        session.assist_state(),
        xiangqi_session::AssistState::Idle
    );
    assert!(session.take_assist_error().is_none());
}

#[test]
fn assist_is_single_flight() {
    let rules = FakeRules::new();
    let suggester = FakeSuggester::new([SuggestionPoll::Pending, SuggestionPoll::Pending]);
    let mut session = Session::new(SessionConfig::default(), rules, suggester);

    // Two presses in one tick, one more on the next: still one request.
    session.tick([assist_click(), assist_click()]);
    session.tick([assist_click()]);

    assert_eq!(session.suggester().requests, 1);
    assert_eq!(
        session.assist_state(),
        xiangqi_session::AssistState::Pending
    );
}

#[test]
fn assist_timeout_fails_without_board_mutation() {
    let rules = FakeRules::new().with_piece(Side::Red, PieceKind::Chariot, 0, 0);
    let suggester = FakeSuggester::new([]);
    let config = SessionConfig::from_json(r#"{ "assist_timeout_ms": 0 }"#).unwrap();
    let mut session = Session::new(config, rules, suggester);

    // Dispatch and poll happen within one tick; the zero timeout trips on
    // the first poll.
    assert_eq!(session.tick([assist_click()]), TickStatus::Running);

    assert!(session.history().is_empty());
    assert_eq!(session.assist_state(), xiangqi_session::AssistState::Idle);
    match session.take_assist_error() {
        Some(SessionError::AssistUnavailable { .. }) => {}
        other => panic!("expected AssistUnavailable, got {other:?}"),
    }
}

#[test]
fn rejected_suggestion_surfaces_desync_and_keeps_history() {
    // Engine suggests a move the rules engine refuses.
    let rules = FakeRules::new().with_piece(Side::Red, PieceKind::Chariot, 0, 0);
    let suggester = FakeSuggester::new([suggested((0, 0), (5, 5))]);
    let mut session = Session::new(SessionConfig::default(), rules, suggester);

    assert_eq!(session.tick([assist_click()]), TickStatus::Running);

    assert!(session.history().is_empty());
    match session.take_assist_error() {
        Some(SessionError::EngineDesync { from, to }) => {
            assert_eq!(from, BoardCell::new(0, 0));
            assert_eq!(to, BoardCell::new(5, 5));
        }
        other => panic!("expected EngineDesync, got {other:?}"),
    }

    // Session continues in human-only mode.
    let config = session.config().clone();
    let select = click(&config, 0, 0);
    assert_eq!(session.tick([select]), TickStatus::Running);
    assert!(session.selection().selected().is_some());
}

#[test]
fn assist_failure_reports_and_recovers() {
    let rules = FakeRules::new();
    let suggester = FakeSuggester::new([
        SuggestionPoll::Failed("model not loaded".into()),
        SuggestionPoll::Pending,
    ]);
    let mut session = Session::new(SessionConfig::default(), rules, suggester);

    session.tick([assist_click()]);
    match session.take_assist_error() {
        Some(SessionError::AssistUnavailable { message }) => {
            assert_eq!(message, "model not loaded");
        }
        other => panic!("expected AssistUnavailable, got {other:?}"),
    }

    // A new dispatch is allowed after the failure was acknowledged.
    session.tick([assist_click()]);
    assert_eq!(session.suggester().requests, 2);
    assert_eq!(
        session.assist_state(),
        xiangqi_session::AssistState::Pending
    );
}

// ============================================================================
// Termination scenarios
// ============================================================================

#[test]
fn quit_ends_session_and_abandons_pending_assist() {
    let rules = FakeRules::new();
    let suggester = FakeSuggester::new([SuggestionPoll::Pending]);
    let mut session = Session::new(SessionConfig::default(), rules, suggester);

    session.tick([assist_click()]);
    assert_eq!(
        session.assist_state(),
        xiangqi_session::AssistState::Pending
    );

    assert_eq!(
        session.tick([InputEvent::Quit]),
        TickStatus::Ended(SessionEnd::Quit)
    );
    assert_eq!(session.assist_state(), xiangqi_session::AssistState::Idle);
    assert_eq!(session.suggester().abandoned, 1);

    // Later ticks keep reporting the same end.
    assert_eq!(
        session.tick([]),
        TickStatus::Ended(SessionEnd::Quit)
    );
}

#[test]
fn game_over_surfaces_winner() {
    let mut rules = FakeRules::new()
        .with_piece(Side::Red, PieceKind::Chariot, 0, 0)
        .allowing((0, 0), (0, 1));
    rules.winner = Some(Winner::Red);
    let mut session = Session::new(SessionConfig::default(), rules, FakeSuggester::new([]));

    assert_eq!(
        session.tick([]),
        TickStatus::Ended(SessionEnd::GameOver(Winner::Red))
    );
}

#[test]
fn request_stop_ends_on_next_tick_boundary() {
    let rules = FakeRules::new();
    let mut session = Session::new(SessionConfig::default(), rules, FakeSuggester::new([]));

    assert_eq!(session.tick([]), TickStatus::Running);
    session.request_stop();
    assert_eq!(session.tick([]), TickStatus::Ended(SessionEnd::Stopped));
}
