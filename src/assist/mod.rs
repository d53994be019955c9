//! Assist coordination
//!
//! Lifecycle of an out-of-band request to the move suggestion engine:
//! dispatch on the assist button, poll every tick, apply or time out.
//! State machine over {Idle, Pending, Completed, Failed}:
//!
//! - `Idle -> Pending` on dispatch; a second dispatch while Pending is a
//!   no-op, never an error (single-flight).
//! - `Pending -> Completed` when the engine reports a move.
//! - `Pending -> Failed` on engine failure or timeout; the board is never
//!   touched on this path.
//! - `Completed -> Idle` when the session takes the move and feeds it
//!   through the resolver; a rejected suggestion comes back as a desync
//!   failure, not a silent drop.
//!
//! Session shutdown while Pending abandons the request; a late result is
//! discarded by the engine side without blocking anything.

pub mod suggester;

use self::suggester::{RequestHandle, SuggestedMove, SuggestionEngine, SuggestionPoll};
use crate::board::BoardSnapshot;
use crate::error::SessionError;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Externally visible coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistState {
    Idle,
    Pending,
    Completed,
    Failed,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Pending { handle: RequestHandle, since: Instant },
    Completed { suggestion: SuggestedMove },
    Failed { error: SessionError },
}

/// Single-flight coordinator for suggestion requests.
pub struct AssistCoordinator {
    phase: Phase,
    timeout: Duration,
}

impl AssistCoordinator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            timeout,
        }
    }

    pub fn state(&self) -> AssistState {
        match self.phase {
            Phase::Idle => AssistState::Idle,
            Phase::Pending { .. } => AssistState::Pending,
            Phase::Completed { .. } => AssistState::Completed,
            Phase::Failed { .. } => AssistState::Failed,
        }
    }

    /// Start a request for the given position. No-op while one is already
    /// in flight, so hammering the assist button never duplicates work.
    pub fn dispatch<S: SuggestionEngine>(&mut self, suggester: &mut S, snapshot: &BoardSnapshot) {
        if let Phase::Pending { .. } = self.phase {
            debug!("[ASSIST] request already in flight, ignoring dispatch");
            return;
        }
        let handle = suggester.request_move(snapshot);
        info!("[ASSIST] dispatched suggestion request {handle:?}");
        self.phase = Phase::Pending {
            handle,
            since: Instant::now(),
        };
    }

    /// Non-blocking observation of an in-flight request; called once per
    /// session tick. Enforces the configured timeout.
    pub fn poll<S: SuggestionEngine>(&mut self, suggester: &mut S) {
        let (handle, since) = match &self.phase {
            Phase::Pending { handle, since } => (*handle, *since),
            _ => return,
        };
        if since.elapsed() >= self.timeout {
            warn!(
                "[ASSIST] request {handle:?} timed out after {:?}",
                self.timeout
            );
            suggester.abandon(handle);
            self.phase = Phase::Failed {
                error: SessionError::AssistUnavailable {
                    message: format!("no suggestion within {:?}", self.timeout),
                },
            };
            return;
        }
        match suggester.poll(handle) {
            SuggestionPoll::Pending => {}
            SuggestionPoll::Move(suggestion) => {
                info!(
                    "[ASSIST] suggestion ready: {} -> {}",
                    suggestion.from, suggestion.to
                );
                self.phase = Phase::Completed { suggestion };
            }
            SuggestionPoll::Failed(message) => {
                warn!("[ASSIST] suggestion request failed: {message}");
                self.phase = Phase::Failed {
                    error: SessionError::AssistUnavailable { message },
                };
            }
        }
    }

    /// Take a completed suggestion, returning to Idle. The caller feeds it
    /// through the move resolver like any human move.
    pub fn take_completed(&mut self) -> Option<SuggestedMove> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Completed { suggestion } => Some(suggestion),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Record a failure, e.g. a desync detected when the rules engine
    /// rejected a completed suggestion.
    pub fn fail(&mut self, error: SessionError) {
        self.phase = Phase::Failed { error };
    }

    /// Acknowledge a failure, returning to Idle so a later dispatch works.
    pub fn take_failure(&mut self) -> Option<SessionError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Failed { error } => Some(error),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Detach from whatever is in flight; used at session end. Never
    /// blocks: the worker side discards its result on its own.
    pub fn abort<S: SuggestionEngine>(&mut self, suggester: &mut S) {
        if let Phase::Pending { handle, .. } = &self.phase {
            let handle = *handle;
            info!("[ASSIST] abandoning in-flight request {handle:?}");
            suggester.abandon(handle);
        }
        self.phase = Phase::Idle;
    }
}
