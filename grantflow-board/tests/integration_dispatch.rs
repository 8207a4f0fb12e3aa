//! Integration tests for dispatch reconciliation: idempotent commands,
//! stale and malformed snapshots, out-of-order completions.

use async_trait::async_trait;
use grantflow_board::test_support::InMemoryGrantStore;
use grantflow_board::{
    Board, BoardError, BoardFilter, BoardState, Card, MoveCommand, RemoteStore, ReorderDispatcher,
    Stage,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

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
async fn test_same_command_twice_converges() {
    let store = Arc::new(InMemoryGrantStore::new(vec![
        Card::new("A", Stage::Researching, 0).with_id("a"),
        Card::new("B", Stage::Researching, 1).with_id("b"),
        Card::new("C", Stage::Researching, 2).with_id("c"),
    ]));
    let state = BoardState::shared();
    let dispatcher = ReorderDispatcher::new(store, state.clone());
    let filter = BoardFilter::all();
    dispatcher.refresh(&filter).await.unwrap();

    let command = MoveCommand::new("c", Stage::Researching, Stage::Researching, 0);
    dispatcher.dispatch(command.clone(), &filter).await.unwrap();
    let after_first = state.lock().unwrap().board().clone();

    // A duplicate event re-dispatches the identical command. new_position is
    // relative to the current list, so nothing drifts.
    dispatcher.dispatch(command, &filter).await.unwrap();
    assert_eq!(state.lock().unwrap().board(), &after_first);
    assert_eq!(
        lane_ids(&after_first, Stage::Researching),
        vec!["c", "a", "b"]
    );
}

#[tokio::test]
async fn test_duplicate_cross_stage_command_is_rejected_without_drift() {
    let store = Arc::new(InMemoryGrantStore::new(seed()));
    let state = BoardState::shared();
    let dispatcher = ReorderDispatcher::new(store, state.clone());
    let filter = BoardFilter::all();
    dispatcher.refresh(&filter).await.unwrap();

    let command = MoveCommand::new("b", Stage::Writing, Stage::Submitted, 0);
    dispatcher.dispatch(command.clone(), &filter).await.unwrap();
    let after_first = state.lock().unwrap().board().clone();

    // The duplicate now references a stage B already left; the store rejects
    // it and the board stays exactly where one dispatch put it.
    let result = dispatcher.dispatch(command, &filter).await;
    assert!(matches!(result, Err(BoardError::Rejected { .. })));
    assert_eq!(state.lock().unwrap().board(), &after_first);
}

#[tokio::test]
async fn test_stale_snapshot_is_discarded() {
    let state = BoardState::shared();
    let newer = Board::from_cards(seed()).unwrap();
    assert!(state.lock().unwrap().replace(5, newer.clone()).unwrap());

    // A slow fetch that started earlier finally lands.
    let older = Board::new();
    let adopted = state.lock().unwrap().replace(3, older).unwrap();
    assert!(!adopted);
    assert_eq!(state.lock().unwrap().board(), &newer);
}

/// Store whose fetches fail and whose reorders succeed, for exercising the
/// reconciling-fetch failure path.
struct AckOnlyStore;

#[async_trait]
impl RemoteStore for AckOnlyStore {
    async fn fetch_board(&self, _filter: &BoardFilter) -> grantflow_board::Result<Board> {
        Err(BoardError::transient("fetch unavailable"))
    }

    async fn reorder(&self, _command: &MoveCommand) -> grantflow_board::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_acknowledged_move_with_failed_fetch_drops_overlay() {
    let state = BoardState::shared();
    state
        .lock()
        .unwrap()
        .replace(1, Board::from_cards(seed()).unwrap())
        .unwrap();
    let before = state.lock().unwrap().board().clone();

    let dispatcher = ReorderDispatcher::new(Arc::new(AckOnlyStore), state.clone());
    let command = MoveCommand::new("b", Stage::Writing, Stage::Submitted, 0);
    let result = dispatcher.dispatch(command, &BoardFilter::all()).await;

    assert!(matches!(result, Err(BoardError::Transient { .. })));
    let state = state.lock().unwrap();
    assert!(state.overlay().is_none());
    // Visible order falls back to the last authoritative snapshot until a
    // later refresh reconciles the acknowledged move.
    assert_eq!(state.visible(), before);
}

/// Store returning a structurally invalid board.
struct MalformedStore;

#[async_trait]
impl RemoteStore for MalformedStore {
    async fn fetch_board(&self, _filter: &BoardFilter) -> grantflow_board::Result<Board> {
        // A card listed under the wrong stage key.
        let board: Board = serde_json::from_str(
            r#"{"writing": [{"id": "x", "title": "X", "stage": "submitted", "position": 0}]}"#,
        )
        .unwrap();
        Ok(board)
    }

    async fn reorder(&self, _command: &MoveCommand) -> grantflow_board::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_malformed_snapshot_keeps_last_good_board() {
    let state = BoardState::shared();
    let good = Board::from_cards(seed()).unwrap();
    state.lock().unwrap().replace(1, good.clone()).unwrap();

    let dispatcher = ReorderDispatcher::new(Arc::new(MalformedStore), state.clone());
    let result = dispatcher.refresh(&BoardFilter::all()).await;

    assert!(matches!(result, Err(BoardError::MalformedBoard { .. })));
    assert_eq!(state.lock().unwrap().board(), &good);
}

/// Store whose fetches complete only when the test releases them, for
/// exercising out-of-order completion.
struct ManualStore {
    pending: Mutex<VecDeque<oneshot::Receiver<Board>>>,
}

impl ManualStore {
    fn new(receivers: Vec<oneshot::Receiver<Board>>) -> Self {
        Self {
            pending: Mutex::new(receivers.into()),
        }
    }
}

#[async_trait]
impl RemoteStore for ManualStore {
    async fn fetch_board(&self, _filter: &BoardFilter) -> grantflow_board::Result<Board> {
        let receiver = self.pending.lock().unwrap().pop_front().unwrap();
        receiver
            .await
            .map_err(|_| BoardError::transient("fetch abandoned"))
    }

    async fn reorder(&self, _command: &MoveCommand) -> grantflow_board::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_newest_board() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let store = Arc::new(ManualStore::new(vec![first_rx, second_rx]));
    let state = BoardState::shared();
    let dispatcher = ReorderDispatcher::new(store, state.clone());
    let filter = BoardFilter::all();

    let early = Board::from_cards(vec![Card::new("Old", Stage::Writing, 0).with_id("old")]).unwrap();
    let late = Board::from_cards(seed()).unwrap();

    let driver = async {
        // Let both fetches start, then complete the second one first.
        tokio::task::yield_now().await;
        second_tx.send(late.clone()).unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        first_tx.send(early.clone()).unwrap();
    };

    let (first_result, second_result, ()) = tokio::join!(
        dispatcher.refresh(&filter),
        dispatcher.refresh(&filter),
        driver
    );

    // The fetch that started second carried the newer sequence and wins; the
    // slow first fetch is discarded as stale.
    assert!(second_result.unwrap());
    assert!(!first_result.unwrap());
    assert_eq!(state.lock().unwrap().board(), &late);
}
