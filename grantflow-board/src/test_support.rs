//! Test helpers: an in-memory remote store and a canned board layout.
//!
//! Gated behind the `test-support` feature for use by this crate's own
//! integration tests and by downstream consumers' tests.

use crate::error::{BoardError, RejectKind, Result};
use crate::remote::{BoardFilter, RemoteStore};
use crate::resolve::DropCandidate;
use crate::types::{Board, Card, MoveCommand, Stage};
use async_trait::async_trait;
use grantflow_spatial::Rect;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Failure to inject into the next `reorder` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    NotFound,
    InvalidTarget,
    Transient,
}

/// In-memory authoritative store.
///
/// Applies accepted moves the way the production backend does (detach,
/// insert before the first card at or past the requested position, renumber
/// both affected lanes) and serves filtered snapshots of the result.
pub struct InMemoryGrantStore {
    cards: Mutex<Vec<Card>>,
    fail_next: Mutex<Option<ScriptedFailure>>,
    reorder_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl InMemoryGrantStore {
    /// Store seeded with the given cards
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards),
            fail_next: Mutex::new(None),
            reorder_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Make the next `reorder` call fail with the given classification
    pub fn fail_next(&self, failure: ScriptedFailure) {
        *self.fail_next.lock().unwrap() = Some(failure);
    }

    /// How many reorder requests reached the store, failures included
    pub fn reorder_calls(&self) -> usize {
        self.reorder_calls.load(Ordering::SeqCst)
    }

    /// How many fetches reached the store
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Current authoritative cards, for assertions
    pub fn snapshot(&self) -> Vec<Card> {
        self.cards.lock().unwrap().clone()
    }

    fn matches(card: &Card, filter: &BoardFilter) -> bool {
        if card.archived && !filter.include_archived {
            return false;
        }
        if let Some(stages) = &filter.stages {
            if !stages.contains(&card.stage) {
                return false;
            }
        }
        if let Some(priority) = filter.priority {
            if card.priority != priority {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let in_title = card.title.to_lowercase().contains(&needle);
            let in_funder = card
                .funder
                .as_deref()
                .map(|funder| funder.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_funder {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl RemoteStore for InMemoryGrantStore {
    async fn fetch_board(&self, filter: &BoardFilter) -> Result<Board> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let cards = self.cards.lock().unwrap();
        let filtered = cards
            .iter()
            .filter(|card| Self::matches(card, filter))
            .cloned()
            .collect();
        Board::from_cards(filtered)
    }

    async fn reorder(&self, command: &MoveCommand) -> Result<()> {
        self.reorder_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = self.fail_next.lock().unwrap().take() {
            return Err(match failure {
                ScriptedFailure::NotFound => {
                    BoardError::rejected(RejectKind::NotFound, "card was deleted")
                }
                ScriptedFailure::InvalidTarget => {
                    BoardError::rejected(RejectKind::InvalidTarget, "stale move request")
                }
                ScriptedFailure::Transient => BoardError::transient("connection reset"),
            });
        }

        let mut cards = self.cards.lock().unwrap();
        let current = cards
            .iter()
            .find(|card| card.id == command.card_id)
            .ok_or_else(|| {
                BoardError::rejected(RejectKind::NotFound, format!("no card {}", command.card_id))
            })?;
        if current.stage != command.from_stage {
            return Err(BoardError::rejected(
                RejectKind::InvalidTarget,
                format!(
                    "card {} is in {}, not {}",
                    command.card_id, current.stage, command.from_stage
                ),
            ));
        }

        let board = Board::from_cards(cards.clone())?;
        let moved = board.with_move(command)?;
        *cards = moved.cards().cloned().collect();
        Ok(())
    }
}

/// Deterministic lane/card geometry for a board: lanes are 280 wide on a
/// 300-pixel grid, cards 240×80 stacked every 90 pixels.
///
/// This mirrors how a board view lays out its columns, which is all the
/// resolver needs for realistic drop-target tests.
pub fn grid_layout(board: &Board) -> Vec<DropCandidate> {
    let mut candidates = Vec::new();
    for (lane_index, stage) in Stage::ALL.iter().enumerate() {
        let x = lane_index as f64 * 300.0;
        candidates.push(DropCandidate::Lane {
            stage: *stage,
            rect: Rect::new(x, 0.0, 280.0, 600.0),
        });
        for (row, card) in board.lane(*stage).iter().enumerate() {
            candidates.push(DropCandidate::Card {
                id: card.id.clone(),
                rect: Rect::new(x + 10.0, row as f64 * 90.0 + 10.0, 240.0, 80.0),
            });
        }
    }
    candidates
}

/// Resting rect of a card in the [`grid_layout`] geometry
pub fn card_rect(board: &Board, id: &crate::types::CardId) -> Option<Rect> {
    grid_layout(board).into_iter().find_map(|candidate| match candidate {
        DropCandidate::Card { id: card_id, rect } if &card_id == id => Some(rect),
        _ => None,
    })
}
