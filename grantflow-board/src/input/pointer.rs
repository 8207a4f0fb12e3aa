//! Pointer gesture adapter.
//!
//! A press arms a pending gesture; the pointer must travel a minimum
//! distance before the gesture is recognized as a drag. Release before the
//! threshold is a click and selects the card instead.

use super::GestureEvent;
use crate::drag::DragEvent;
use crate::types::CardId;
use grantflow_spatial::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Tunables for pointer gesture recognition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Minimum pointer travel in pixels before a press becomes a drag
    pub activation_distance: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            activation_distance: 8.0,
        }
    }
}

/// Raw pointer events from the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Press on a card; `rect` is the card's resting geometry
    Down { card: CardId, at: Point, rect: Rect },
    /// Pointer moved while pressed
    Move { at: Point },
    /// Pointer released
    Up,
    /// Escape key or platform-level cancellation
    Cancel,
}

#[derive(Debug, Default)]
enum PointerPhase {
    #[default]
    Idle,
    /// Pressed but still below the activation distance
    Pending {
        card: CardId,
        pressed_at: Point,
        rect: Rect,
    },
    /// Past the threshold; drag events are flowing
    Dragging { pressed_at: Point, rect: Rect },
}

/// Translates raw pointer input into gesture events
#[derive(Debug, Default)]
pub struct PointerAdapter {
    config: PointerConfig,
    phase: PointerPhase,
}

impl PointerAdapter {
    /// Adapter with default tunables
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter with explicit tunables
    pub fn with_config(config: PointerConfig) -> Self {
        Self {
            config,
            phase: PointerPhase::Idle,
        }
    }

    /// Feed one raw pointer event; returns the gesture events it produced
    pub fn on_input(&mut self, input: PointerInput) -> Vec<GestureEvent> {
        match input {
            PointerInput::Down { card, at, rect } => {
                self.phase = PointerPhase::Pending {
                    card,
                    pressed_at: at,
                    rect,
                };
                Vec::new()
            }
            PointerInput::Move { at } => self.on_move(at),
            PointerInput::Up => match std::mem::take(&mut self.phase) {
                PointerPhase::Idle => Vec::new(),
                // Released below the threshold: a click, not a drag.
                PointerPhase::Pending { card, .. } => vec![GestureEvent::Select(card)],
                PointerPhase::Dragging { .. } => vec![GestureEvent::Drag(DragEvent::End)],
            },
            PointerInput::Cancel => match std::mem::take(&mut self.phase) {
                PointerPhase::Dragging { .. } => vec![GestureEvent::Drag(DragEvent::Cancel)],
                _ => Vec::new(),
            },
        }
    }

    fn on_move(&mut self, at: Point) -> Vec<GestureEvent> {
        match &self.phase {
            PointerPhase::Idle => Vec::new(),
            PointerPhase::Pending {
                card,
                pressed_at,
                rect,
            } => {
                if at.distance_to(pressed_at) < self.config.activation_distance {
                    return Vec::new();
                }
                let card = card.clone();
                let pressed_at = *pressed_at;
                let rect = *rect;
                tracing::debug!("pointer travel passed threshold, starting drag of {}", card);
                self.phase = PointerPhase::Dragging { pressed_at, rect };
                vec![
                    GestureEvent::Drag(DragEvent::Start { card }),
                    GestureEvent::Drag(DragEvent::Move {
                        rect: dragged_rect(&rect, &pressed_at, &at),
                    }),
                ]
            }
            PointerPhase::Dragging { pressed_at, rect } => {
                vec![GestureEvent::Drag(DragEvent::Move {
                    rect: dragged_rect(rect, pressed_at, &at),
                })]
            }
        }
    }
}

/// The card's resting rect carried along with the pointer
fn dragged_rect(rect: &Rect, pressed_at: &Point, at: &Point) -> Rect {
    rect.translated(at.x - pressed_at.x, at.y - pressed_at.y)
}
