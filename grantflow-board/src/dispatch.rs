//! Reorder dispatch and reconciliation.
//!
//! Turns a completed move command into a remote request and reconciles the
//! outcome against the shared board state. The visible board may reflect the
//! intended target optimistically while the request is in flight, but the
//! authoritative lists only change when a subsequent canonical fetch is
//! adopted. Commands are dispatched in drag-completion order; completions may
//! arrive out of order and are serialized by the snapshot sequence guard in
//! [`BoardState::replace`](crate::BoardState::replace).

use crate::error::Result;
use crate::remote::{BoardFilter, RemoteStore};
use crate::state::SharedBoard;
use crate::types::MoveCommand;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sends move commands to the remote store and reconciles the results
/// against the injected board handle.
pub struct ReorderDispatcher {
    store: Arc<dyn RemoteStore>,
    state: SharedBoard,
    fetch_seq: AtomicU64,
}

impl ReorderDispatcher {
    /// Create a dispatcher over the given store and board handle
    pub fn new(store: Arc<dyn RemoteStore>, state: SharedBoard) -> Self {
        Self {
            store,
            state,
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// The board handle this dispatcher reconciles into
    pub fn state(&self) -> &SharedBoard {
        &self.state
    }

    /// Fetch an authoritative snapshot and adopt it unless a newer one has
    /// already been adopted.
    ///
    /// The sequence number is taken when the fetch *starts*, so a slow early
    /// fetch can never overwrite the result of a later one. Returns whether
    /// the snapshot was adopted.
    pub async fn refresh(&self, filter: &BoardFilter) -> Result<bool> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let board = self.store.fetch_board(filter).await?;
        self.state.lock().unwrap().replace(seq, board)
    }

    /// Dispatch one move command: optimistic overlay, remote call, reconcile.
    ///
    /// On success the follow-up fetch carries the real order and is adopted
    /// through the sequence guard. On any failure the overlay is dropped and
    /// the visible board reverts to the last authoritative snapshot; the
    /// classified error is returned for the notification layer to surface.
    /// The engine never retries on its own.
    pub async fn dispatch(&self, command: MoveCommand, filter: &BoardFilter) -> Result<()> {
        tracing::debug!(
            "dispatching reorder: {}",
            serde_json::to_string(&command).unwrap_or_default()
        );
        self.state.lock().unwrap().set_overlay(command.clone());

        match self.store.reorder(&command).await {
            Ok(()) => {
                if let Err(error) = self.refresh(filter).await {
                    // The move was acknowledged but the confirming fetch
                    // failed; drop the overlay and let a later refresh
                    // reconcile the real order.
                    self.state.lock().unwrap().clear_overlay();
                    tracing::warn!("reconciling fetch failed after reorder: {}", error);
                    return Err(error);
                }
                Ok(())
            }
            Err(error) => {
                self.state.lock().unwrap().clear_overlay();
                tracing::warn!("reorder failed, rolling back: {}", error);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::test_support::{InMemoryGrantStore, ScriptedFailure};
    use crate::types::{Board, Card, Stage};

    fn seed() -> Vec<Card> {
        vec![
            Card::new("A", Stage::Writing, 0).with_id("a"),
            Card::new("B", Stage::Writing, 1).with_id("b"),
            Card::new("C", Stage::Submitted, 0).with_id("c"),
        ]
    }

    fn lane_ids(board: &Board, stage: Stage) -> Vec<String> {
        board
            .lane(stage)
            .iter()
            .map(|card| card.id.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_refresh_adopts_snapshot() {
        let store = Arc::new(InMemoryGrantStore::new(seed()));
        let state = crate::BoardState::shared();
        let dispatcher = ReorderDispatcher::new(store, state.clone());

        assert!(dispatcher.refresh(&BoardFilter::all()).await.unwrap());
        let state = state.lock().unwrap();
        assert_eq!(state.board().len(), 3);
        assert_eq!(state.seq(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_reconciles_authoritative_order() {
        let store = Arc::new(InMemoryGrantStore::new(seed()));
        let state = crate::BoardState::shared();
        let dispatcher = ReorderDispatcher::new(store, state.clone());
        let filter = BoardFilter::all();
        dispatcher.refresh(&filter).await.unwrap();

        let command = MoveCommand::new("b", Stage::Writing, Stage::Submitted, 0);
        dispatcher.dispatch(command, &filter).await.unwrap();

        let state = state.lock().unwrap();
        assert_eq!(lane_ids(state.board(), Stage::Writing), vec!["a"]);
        assert_eq!(lane_ids(state.board(), Stage::Submitted), vec!["b", "c"]);
        assert!(state.overlay().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_failure_rolls_back() {
        let store = Arc::new(InMemoryGrantStore::new(seed()));
        let state = crate::BoardState::shared();
        let dispatcher = ReorderDispatcher::new(store.clone(), state.clone());
        let filter = BoardFilter::all();
        dispatcher.refresh(&filter).await.unwrap();

        let before = state.lock().unwrap().board().clone();
        store.fail_next(ScriptedFailure::Transient);

        let command = MoveCommand::new("b", Stage::Writing, Stage::Submitted, 0);
        let result = dispatcher.dispatch(command, &filter).await;
        assert!(matches!(result, Err(BoardError::Transient { .. })));

        let state = state.lock().unwrap();
        assert_eq!(state.board(), &before);
        assert!(state.overlay().is_none());
        assert_eq!(state.visible(), before);
    }

    #[tokio::test]
    async fn test_dispatch_rejection_rolls_back() {
        let store = Arc::new(InMemoryGrantStore::new(seed()));
        let state = crate::BoardState::shared();
        let dispatcher = ReorderDispatcher::new(store.clone(), state.clone());
        let filter = BoardFilter::all();
        dispatcher.refresh(&filter).await.unwrap();

        let before = state.lock().unwrap().board().clone();
        store.fail_next(ScriptedFailure::NotFound);

        let command = MoveCommand::new("b", Stage::Writing, Stage::Submitted, 0);
        let result = dispatcher.dispatch(command, &filter).await;
        assert!(matches!(result, Err(BoardError::Rejected { .. })));
        assert_eq!(state.lock().unwrap().board(), &before);
    }
}
