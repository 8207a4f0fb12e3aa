//! Keyboard reordering adapter.
//!
//! Arrow keys move the focused card one slot at a time within or across
//! stages. Each accepted keypress synthesizes a full start→move→end cycle
//! whose move event carries the *target candidate's* resting rect, so the
//! drag session controller and the collision resolver are reused unmodified
//! and keyboard moves behave identically to pointer drags.

use super::GestureEvent;
use crate::drag::DragEvent;
use crate::resolve::DropCandidate;
use crate::types::{Board, CardId, Stage};
use grantflow_spatial::Rect;

/// Discrete keyboard commands for the focused card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Move one slot up within the stage
    MoveUp,
    /// Move one slot down within the stage
    MoveDown,
    /// Move to the previous stage
    MoveLeft,
    /// Move to the next stage
    MoveRight,
    /// Open the focused card (Enter/Space)
    Select,
}

/// What a keyboard step lands on
#[derive(Debug, Clone, PartialEq)]
enum KeyTarget {
    /// Insert before this card
    Before(CardId),
    /// Append to this stage
    EndOf(Stage),
}

/// Translates discrete key commands into gesture events
#[derive(Debug, Default)]
pub struct KeyboardAdapter;

impl KeyboardAdapter {
    /// Create a new adapter
    pub fn new() -> Self {
        Self
    }

    /// Gesture events for one keypress on the focused card.
    ///
    /// Empty when the move would fall off the board edge or when the target's
    /// geometry is not among the candidates.
    pub fn on_input(
        &self,
        key: KeyInput,
        focused: &CardId,
        board: &Board,
        candidates: &[DropCandidate],
    ) -> Vec<GestureEvent> {
        if key == KeyInput::Select {
            return vec![GestureEvent::Select(focused.clone())];
        }

        let Some((stage, index)) = board.locate(focused) else {
            tracing::debug!("keyboard move for unknown card {}", focused);
            return Vec::new();
        };
        let Some(target) = step_target(key, stage, index, board) else {
            return Vec::new();
        };
        let Some(rect) = target_rect(&target, candidates) else {
            tracing::debug!("no geometry for keyboard move target {:?}", target);
            return Vec::new();
        };

        vec![
            GestureEvent::Drag(DragEvent::Start {
                card: focused.clone(),
            }),
            GestureEvent::Drag(DragEvent::Move { rect }),
            GestureEvent::Drag(DragEvent::End),
        ]
    }
}

/// The slot one step away in the given direction, or `None` at a board edge
fn step_target(key: KeyInput, stage: Stage, index: usize, board: &Board) -> Option<KeyTarget> {
    let lane = board.lane(stage);
    match key {
        KeyInput::MoveUp => {
            if index == 0 {
                return None;
            }
            Some(KeyTarget::Before(lane[index - 1].id.clone()))
        }
        KeyInput::MoveDown => {
            if index + 1 >= lane.len() {
                return None;
            }
            // One slot down means landing after the next card: insert before
            // the card after it, or append when the next card is last.
            match lane.get(index + 2) {
                Some(after) => Some(KeyTarget::Before(after.id.clone())),
                None => Some(KeyTarget::EndOf(stage)),
            }
        }
        KeyInput::MoveLeft => stage.prev().map(|target| enter_stage(target, index, board)),
        KeyInput::MoveRight => stage.next().map(|target| enter_stage(target, index, board)),
        KeyInput::Select => None,
    }
}

/// Entering an adjacent stage keeps the list index when it exists, else
/// appends
fn enter_stage(stage: Stage, index: usize, board: &Board) -> KeyTarget {
    match board.lane(stage).get(index) {
        Some(card) => KeyTarget::Before(card.id.clone()),
        None => KeyTarget::EndOf(stage),
    }
}

/// Resting rect of the target among the advertised candidates
fn target_rect(target: &KeyTarget, candidates: &[DropCandidate]) -> Option<Rect> {
    candidates
        .iter()
        .find(|candidate| match (target, candidate) {
            (KeyTarget::Before(id), DropCandidate::Card { id: candidate_id, .. }) => {
                id == candidate_id
            }
            (KeyTarget::EndOf(stage), DropCandidate::Lane { stage: candidate_stage, .. }) => {
                stage == candidate_stage
            }
            _ => false,
        })
        .map(|candidate| *candidate.rect())
}
