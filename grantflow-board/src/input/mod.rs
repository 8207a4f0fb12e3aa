//! Input adapters: pointer and keyboard gesture sources.
//!
//! Both adapters normalize their modality into the same [`GestureEvent`]
//! vocabulary, so the drag session controller has a single code path for
//! pointer and keyboard reordering.

mod keyboard;
mod pointer;

pub use keyboard::{KeyInput, KeyboardAdapter};
pub use pointer::{PointerAdapter, PointerConfig, PointerInput};

use crate::drag::DragEvent;
use crate::types::CardId;

/// One event vocabulary for both input modalities
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Feed to the drag session controller
    Drag(DragEvent),
    /// Card chosen for the detail view collaborator; never mutates board
    /// state
    Select(CardId),
}
