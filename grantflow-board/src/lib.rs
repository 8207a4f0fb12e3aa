//! Kanban board reordering engine for grant-application tracking.
//!
//! This crate decides *what a drag means* and *what gets sent to the backing
//! store*. It owns neither rendering nor persistence. A board view feeds raw
//! pointer/keyboard input plus its current layout geometry; the engine tracks
//! the ordered partition of cards across the fixed stages, translates
//! gestures into at most one [`MoveCommand`] per completed drag, and
//! reconciles asynchronous, possibly-failing persistence without corrupting
//! the visible order.
//!
//! ## Overview
//!
//! - **One engine, pluggable view**: [`BoardEngine`] exposes the visible
//!   board, the drag preview, and returned events; a rendering layer merely
//!   observes.
//! - **Whole-board replacement**: every adopted fetch swaps the board
//!   atomically after invariant validation. Snapshots are never patched
//!   incrementally, and stale out-of-order responses are discarded by
//!   sequence.
//! - **The store stays authoritative**: a move is shown optimistically
//!   through a view overlay, but the lists only change when the confirming
//!   fetch is adopted, so failures roll back exactly.
//! - **One code path for pointer and keyboard**: both adapters speak the
//!   same gesture vocabulary, and keyboard reordering is behaviorally
//!   identical to dragging.
//!
//! ## Basic usage
//!
//! ```rust
//! use grantflow_board::{
//!     Board, Card, DragController, DragEvent, DropCandidate, Rect, Stage,
//! };
//!
//! # fn main() -> grantflow_board::Result<()> {
//! let card = Card::new("NSF CAREER proposal", Stage::Writing, 0);
//! let id = card.id.clone();
//! let board = Board::from_cards(vec![card])?;
//!
//! let mut controller = DragController::new();
//! let candidates = [DropCandidate::Lane {
//!     stage: Stage::Submitted,
//!     rect: Rect::new(600.0, 0.0, 280.0, 600.0),
//! }];
//!
//! controller.on_event(DragEvent::Start { card: id }, &board, &candidates);
//! controller.on_event(
//!     DragEvent::Move {
//!         rect: Rect::new(610.0, 40.0, 240.0, 80.0),
//!     },
//!     &board,
//!     &candidates,
//! );
//! let command = controller.on_event(DragEvent::End, &board, &candidates);
//! assert!(command.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! The command is then handed to [`BoardEngine::dispatch`] (or a
//! [`ReorderDispatcher`] directly), which sends it to the injected
//! [`RemoteStore`] and adopts the authoritative board the next fetch returns.

mod dispatch;
mod drag;
mod engine;
mod error;
pub mod input;
mod remote;
mod resolve;
mod state;
pub mod types;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use dispatch::ReorderDispatcher;
pub use drag::{DragController, DragEvent, DragSession};
pub use engine::{BoardEngine, EngineEvent};
pub use error::{BoardError, RejectKind, Result};
pub use input::{GestureEvent, KeyInput, KeyboardAdapter, PointerAdapter, PointerConfig, PointerInput};
pub use remote::{BoardFilter, RemoteStore};
pub use resolve::{resolve_target, DropCandidate};
pub use state::{BoardState, SharedBoard};
pub use types::{Board, BoardTotals, Card, CardId, MoveCommand, Priority, Slot, Stage};

// Re-export the geometry primitives the public API speaks in
pub use grantflow_spatial::{Point, Rect};
