//! Shared board state: atomic replacement, snapshot sequencing, and the
//! optimistic view overlay.
//!
//! The board is replaced wholesale on every adopted fetch; it is never
//! incrementally patched. An in-flight move is represented as a view-level
//! overlay so the authoritative lists stay untouched until the remote store
//! confirms the new order, and rollback on failure is exact by construction.

use crate::error::Result;
use crate::types::{Board, Card, CardId, MoveCommand};
use std::sync::{Arc, Mutex};

/// Injected handle to the single shared board.
///
/// All mutation goes through [`BoardState::replace`] or the overlay; there is
/// no per-card locking because swaps are whole-board and the UI thread is
/// single-threaded.
pub type SharedBoard = Arc<Mutex<BoardState>>;

/// Owns the authoritative board, the sequence of the last adopted snapshot,
/// and the optimistic overlay for an in-flight move.
#[derive(Debug, Default)]
pub struct BoardState {
    board: Board,
    seq: u64,
    overlay: Option<MoveCommand>,
}

impl BoardState {
    /// Empty state; populated by the first adopted fetch
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh shared handle for dependency injection
    pub fn shared() -> SharedBoard {
        Arc::new(Mutex::new(Self::new()))
    }

    /// The authoritative board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Sequence number of the last adopted snapshot
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Card lookup on the authoritative board
    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.board.find(id)
    }

    /// Adopt an authoritative snapshot.
    ///
    /// The snapshot is validated first; a malformed board is rejected and the
    /// previous board is kept. A snapshot whose sequence is not newer than the
    /// last adopted one is discarded as stale, so out-of-order completions
    /// never overwrite newer authoritative state. Returns whether the
    /// snapshot was adopted.
    pub fn replace(&mut self, seq: u64, board: Board) -> Result<bool> {
        if let Err(error) = board.validate() {
            tracing::warn!("discarding malformed board snapshot: {}", error);
            return Err(error);
        }
        if seq <= self.seq {
            tracing::warn!(
                "discarding stale board snapshot (seq {} <= adopted {})",
                seq,
                self.seq
            );
            return Ok(false);
        }
        self.board = board;
        self.seq = seq;
        // Whatever move the overlay anticipated, the snapshot is newer truth.
        self.overlay = None;
        tracing::debug!("adopted board snapshot seq {}", seq);
        Ok(true)
    }

    /// Record the intended target of an in-flight move for view projection
    pub fn set_overlay(&mut self, command: MoveCommand) {
        self.overlay = Some(command);
    }

    /// Drop the optimistic overlay, reverting the visible board to the last
    /// authoritative snapshot
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    /// The in-flight move currently projected, if any
    pub fn overlay(&self) -> Option<&MoveCommand> {
        self.overlay.as_ref()
    }

    /// Board as the rendering layer should show it, with any optimistic move
    /// applied. The authoritative board is never touched by this projection.
    pub fn visible(&self) -> Board {
        match &self.overlay {
            Some(command) => self.board.with_move(command).unwrap_or_else(|error| {
                tracing::debug!("overlay no longer applies: {}", error);
                self.board.clone()
            }),
            None => self.board.clone(),
        }
    }
}
