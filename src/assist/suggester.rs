//! Move suggestion engine contract and threaded adapter
//!
//! The suggestion engine is the only concurrency boundary in the system:
//! requests are dispatched non-blockingly and completion is observed by
//! polling from the session loop, never awaited. `ThreadedSuggester` wraps
//! a blocking best-move function in a worker thread with a single-slot
//! mailbox per request, which is how a real search engine plugs in.

use crate::board::{BoardCell, BoardSnapshot};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Token for one outstanding suggestion request. Minted by the engine
/// that received the request; meaningless to anyone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestHandle(u64);

impl RequestHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A move recommended by the suggestion engine. It has not been validated;
/// it goes through the same resolver as a human move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedMove {
    pub from: BoardCell,
    pub to: BoardCell,
}

/// Poll result for an outstanding request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SuggestionPoll {
    Pending,
    Move(SuggestedMove),
    Failed(String),
}

/// The contract the coordinator consumes from the move suggestion engine.
pub trait SuggestionEngine {
    /// Start computing a suggestion for `snapshot`. Must not block.
    fn request_move(&mut self, snapshot: &BoardSnapshot) -> RequestHandle;

    /// Observe the state of an outstanding request. Must not block.
    fn poll(&mut self, handle: RequestHandle) -> SuggestionPoll;

    /// Detach from an outstanding request. A result arriving later is
    /// discarded; the engine must not require the caller to wait.
    fn abandon(&mut self, handle: RequestHandle);
}

type SuggestResult = Result<SuggestedMove, String>;

/// Runs a blocking best-move function on a worker thread per request.
///
/// Each request gets its own bounded(1) channel, so at most one result is
/// ever observed per dispatch and an abandoned worker's send simply fails.
pub struct ThreadedSuggester<F> {
    compute: Arc<F>,
    next_id: u64,
    inflight: HashMap<u64, Receiver<SuggestResult>>,
}

impl<F> ThreadedSuggester<F>
where
    F: Fn(BoardSnapshot) -> SuggestResult + Send + Sync + 'static,
{
    pub fn new(compute: F) -> Self {
        Self {
            compute: Arc::new(compute),
            next_id: 0,
            inflight: HashMap::new(),
        }
    }
}

impl<F> SuggestionEngine for ThreadedSuggester<F>
where
    F: Fn(BoardSnapshot) -> SuggestResult + Send + Sync + 'static,
{
    fn request_move(&mut self, snapshot: &BoardSnapshot) -> RequestHandle {
        self.next_id += 1;
        let id = self.next_id;
        let (tx, rx) = bounded(1);
        let compute = Arc::clone(&self.compute);
        let snapshot = snapshot.clone();
        let spawned = thread::Builder::new()
            .name(format!("suggest-{id}"))
            .spawn(move || {
                let result = compute(snapshot);
                // The session may have abandoned the request; a failed
                // send just discards the result.
                let _ = tx.send(result);
            });
        if let Err(err) = spawned {
            // Channel sender was dropped with the closure; poll will
            // report the disconnect as a failure.
            warn!("[ASSIST] failed to spawn suggestion worker: {err}");
        }
        self.inflight.insert(id, rx);
        RequestHandle(id)
    }

    fn poll(&mut self, handle: RequestHandle) -> SuggestionPoll {
        let Some(rx) = self.inflight.get(&handle.0) else {
            return SuggestionPoll::Failed(format!("unknown request {}", handle.0));
        };
        match rx.try_recv() {
            Ok(Ok(suggestion)) => {
                self.inflight.remove(&handle.0);
                SuggestionPoll::Move(suggestion)
            }
            Ok(Err(message)) => {
                self.inflight.remove(&handle.0);
                SuggestionPoll::Failed(message)
            }
            Err(TryRecvError::Empty) => SuggestionPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.inflight.remove(&handle.0);
                SuggestionPoll::Failed("suggestion worker exited without a result".into())
            }
        }
    }

    fn abandon(&mut self, handle: RequestHandle) {
        if self.inflight.remove(&handle.0).is_some() {
            debug!("[ASSIST] abandoned request {}", handle.0);
        }
    }
}
