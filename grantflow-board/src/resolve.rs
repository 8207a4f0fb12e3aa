//! Drop-target resolution over board geometry.
//!
//! The rendering layer advertises the resting geometry of every droppable
//! region (stage containers and cards, including the dragged card's own
//! slot), and the resolver picks exactly one target for the dragged rect by
//! nearest-corners distance. Ties break by declaration order, so repeated
//! identical gestures always resolve identically.

use crate::types::{Board, CardId, Slot, Stage};
use grantflow_spatial::{closest_candidate, Rect};

/// A droppable region advertised by the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum DropCandidate {
    /// A whole stage container; dropping here appends to the stage
    Lane { stage: Stage, rect: Rect },
    /// A resting card; dropping here inserts before it
    Card { id: CardId, rect: Rect },
}

impl DropCandidate {
    /// The candidate's resting geometry
    pub fn rect(&self) -> &Rect {
        match self {
            DropCandidate::Lane { rect, .. } => rect,
            DropCandidate::Card { rect, .. } => rect,
        }
    }
}

/// Resolve the single drop target for a dragged card.
///
/// Returns `None` when there are no candidates (pointer outside every
/// droppable region) or when the winning candidate refers to a card that is
/// no longer on the board; both cases are treated as a cancel upstream, not
/// an error.
pub fn resolve_target(
    dragged: &Rect,
    candidates: &[DropCandidate],
    board: &Board,
    dragging: &CardId,
) -> Option<Slot> {
    let rects: Vec<Rect> = candidates.iter().map(|candidate| *candidate.rect()).collect();
    let winner = closest_candidate(dragged, &rects)?;

    match &candidates[winner] {
        DropCandidate::Lane { stage, .. } => {
            Some(Slot::new(*stage, append_position(board, *stage, dragging)))
        }
        DropCandidate::Card { id, .. } => match board.find(id) {
            Some(card) => Some(card.slot()),
            None => {
                tracing::debug!("drop candidate {} is no longer on the board", id);
                None
            }
        },
    }
}

/// Position after the last card in a stage, skipping the card being moved
fn append_position(board: &Board, stage: Stage, dragging: &CardId) -> u32 {
    board
        .lane(stage)
        .iter()
        .filter(|card| &card.id != dragging)
        .last()
        .map(|card| card.position + 1)
        .unwrap_or(0)
}
