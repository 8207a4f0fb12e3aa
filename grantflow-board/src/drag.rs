//! Drag session state machine.
//!
//! Translates the shared gesture vocabulary into at most one [`MoveCommand`]
//! per completed drag. The session is transient and never persisted; the
//! provisional target is visual feedback only and never mutates board state.
//! The controller hands a completed command to the dispatcher and returns to
//! idle immediately; it never waits on network completion.

use crate::resolve::{resolve_target, DropCandidate};
use crate::types::{Board, CardId, MoveCommand, Slot};
use grantflow_spatial::Rect;

/// Events in the shared gesture vocabulary produced by the input adapters
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// A drag began on the given card
    Start { card: CardId },
    /// The dragged card's geometry moved
    Move { rect: Rect },
    /// The card was released
    End,
    /// The gesture was abandoned (escape, drop outside the board)
    Cancel,
}

/// Transient state for one in-progress drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    card: CardId,
    origin: Slot,
    target: Option<Slot>,
}

impl DragSession {
    /// The card being dragged
    pub fn card(&self) -> &CardId {
        &self.card
    }

    /// The slot the card occupied when the drag began
    pub fn origin(&self) -> Slot {
        self.origin
    }

    /// The provisional drop target, if the pointer is over a droppable region
    pub fn target(&self) -> Option<Slot> {
        self.target
    }
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Active(DragSession),
}

/// State machine for drag sessions: `idle → active → {commit | idle}`.
///
/// Exactly one move command is emitted per drag that completes on a slot
/// different from the card's current one; no-op drops, cancels, and drops
/// outside every droppable region emit nothing.
#[derive(Debug, Default)]
pub struct DragController {
    phase: Phase,
}

impl DragController {
    /// Create a new controller in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress session, if any, for the rendering layer to observe
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(session) => Some(session),
        }
    }

    /// Provisional target slot of the active session
    pub fn preview(&self) -> Option<Slot> {
        self.session().and_then(DragSession::target)
    }

    /// Whether a drag is in progress
    pub fn is_active(&self) -> bool {
        self.session().is_some()
    }

    /// Feed one gesture event.
    ///
    /// Returns a move command exactly when a drag completes on a slot
    /// different from the dragged card's current one.
    pub fn on_event(
        &mut self,
        event: DragEvent,
        board: &Board,
        candidates: &[DropCandidate],
    ) -> Option<MoveCommand> {
        match event {
            DragEvent::Start { card } => {
                self.start(card, board);
                None
            }
            DragEvent::Move { rect } => {
                self.update_target(&rect, board, candidates);
                None
            }
            DragEvent::End => self.finish(board),
            DragEvent::Cancel => {
                self.cancel();
                None
            }
        }
    }

    fn start(&mut self, card: CardId, board: &Board) {
        if self.is_active() {
            tracing::debug!("ignoring drag start while a session is active");
            return;
        }
        let Some(existing) = board.find(&card) else {
            tracing::debug!("ignoring drag start for unknown card {}", card);
            return;
        };
        let origin = existing.slot();
        tracing::debug!("drag started for card {} from {:?}", card, origin);
        self.phase = Phase::Active(DragSession {
            card,
            origin,
            target: None,
        });
    }

    fn update_target(&mut self, rect: &Rect, board: &Board, candidates: &[DropCandidate]) {
        if let Phase::Active(session) = &mut self.phase {
            session.target = resolve_target(rect, candidates, board, &session.card);
        }
    }

    fn finish(&mut self, board: &Board) -> Option<MoveCommand> {
        let Phase::Active(session) = std::mem::take(&mut self.phase) else {
            return None;
        };
        let Some(target) = session.target else {
            tracing::debug!("drag ended outside every droppable region");
            return None;
        };
        let Some(current) = board.find(&session.card) else {
            tracing::debug!("dragged card {} vanished before drop", session.card);
            return None;
        };
        if target == current.slot() {
            tracing::debug!("drag ended on the card's own slot, nothing to do");
            return None;
        }
        tracing::debug!(
            "committing move of {} from {:?} to {:?}",
            session.card,
            current.slot(),
            target
        );
        Some(MoveCommand {
            card_id: session.card,
            from_stage: current.stage,
            to_stage: target.stage,
            new_position: target.position,
        })
    }

    fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!("drag cancelled");
        }
        self.phase = Phase::Idle;
    }
}
