//! Interactive session coordinator for a xiangqi client
//!
//! Turns raw pointer input into validated board moves, keeps the move
//! history, and brokers on-demand requests to an external move-suggestion
//! engine. Board rules and the suggestion search itself live behind the
//! [`engine::RulesEngine`] and [`assist::suggester::SuggestionEngine`]
//! traits; rendering reads the session's output surface (selection,
//! history, assist state) and feeds events back in.
//!
//! ```rust,ignore
//! let mut session = Session::new(SessionConfig::default(), rules, suggester);
//! loop {
//!     match session.tick(window.drain_events()) {
//!         TickStatus::Running => renderer.draw(&session),
//!         TickStatus::Ended(end) => break println!("{end:?}"),
//!     }
//! }
//! ```

pub mod assist;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use assist::suggester::{
    RequestHandle, SuggestedMove, SuggestionEngine, SuggestionPoll, ThreadedSuggester,
};
pub use assist::{AssistCoordinator, AssistState};
pub use board::coordinates::{CoordinateMapper, PixelRect};
pub use board::{BoardCell, BoardSnapshot, PieceKind, PieceRef, Side, Winner};
pub use config::SessionConfig;
pub use engine::{ApplyResult, RejectReason, RulesEngine};
pub use error::{SessionError, SessionResult};
pub use session::events::InputEvent;
pub use session::history::{HistoryEntry, HistoryLog, MoveRecord};
pub use session::resolver::MoveOutcome;
pub use session::selection::{ClickAction, SelectionResult, SelectionState};
pub use session::{Session, SessionEnd, TickStatus};

/// Install the process-wide tracing subscriber, honoring `RUST_LOG`.
/// Called once by the embedding binary during bootstrap.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
