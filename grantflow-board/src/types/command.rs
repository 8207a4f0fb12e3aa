//! Move command value object

use super::ids::CardId;
use super::stage::Stage;
use serde::{Deserialize, Serialize};

/// A slot on the board: stage plus ordering position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub stage: Stage,
    pub position: u32,
}

impl Slot {
    /// Create a new slot
    pub fn new(stage: Stage, position: u32) -> Self {
        Self { stage, position }
    }
}

/// The requested stage/position change for one card.
///
/// Created once per completed drag and accepted or rejected by the remote
/// store as a whole; there is no partial application. `new_position` is
/// always expressed relative to the current list, never as a delta, so
/// dispatching the same command twice converges to the same final board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub card_id: CardId,
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub new_position: u32,
}

impl MoveCommand {
    /// Create a new move command
    pub fn new(
        card_id: impl Into<CardId>,
        from_stage: Stage,
        to_stage: Stage,
        new_position: u32,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            from_stage,
            to_stage,
            new_position,
        }
    }

    /// The slot this command targets
    pub fn target(&self) -> Slot {
        Slot::new(self.to_stage, self.new_position)
    }
}
