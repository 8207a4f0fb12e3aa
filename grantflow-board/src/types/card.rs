//! Card types: a grant application as it appears on the board

use super::command::Slot;
use super::ids::CardId;
use super::stage::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency bucket used by the filter UI
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A grant application card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funder: Option<String>,
    /// Submission deadline; drives the overdue count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub archived: bool,
    /// Stage key; must match the list the card is stored under
    pub stage: Stage,
    /// Ordering key within the stage: ascending, unique, not required to be
    /// contiguous
    pub position: u32,
}

impl Card {
    /// Create a new card at the given slot
    pub fn new(title: impl Into<String>, stage: Stage, position: u32) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            funder: None,
            deadline: None,
            priority: Priority::default(),
            archived: false,
            stage,
            position,
        }
    }

    /// Set the funding organization
    pub fn with_funder(mut self, funder: impl Into<String>) -> Self {
        self.funder = Some(funder.into());
        self
    }

    /// Set the submission deadline
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set an explicit id (e.g. when mirroring a remote record)
    pub fn with_id(mut self, id: impl Into<CardId>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark the card archived
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// The slot the card currently occupies
    pub fn slot(&self) -> Slot {
        Slot {
            stage: self.stage,
            position: self.position,
        }
    }

    /// Overdue means the deadline has passed while the card is still in a
    /// workable stage.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.stage.is_terminal() {
            return false;
        }
        self.deadline.map(|deadline| deadline < now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_card_creation() {
        let card = Card::new("NSF CAREER proposal", Stage::Writing, 3);
        assert_eq!(card.title, "NSF CAREER proposal");
        assert_eq!(card.stage, Stage::Writing);
        assert_eq!(card.position, 3);
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.funder.is_none());
        assert!(!card.archived);
    }

    #[test]
    fn test_card_builders() {
        let deadline = Utc::now();
        let card = Card::new("Ford Foundation LOI", Stage::Researching, 0)
            .with_funder("Ford Foundation")
            .with_deadline(deadline)
            .with_priority(Priority::High);
        assert_eq!(card.funder.as_deref(), Some("Ford Foundation"));
        assert_eq!(card.deadline, Some(deadline));
        assert_eq!(card.priority, Priority::High);
    }

    #[test]
    fn test_slot() {
        let card = Card::new("Test", Stage::Submitted, 7);
        let slot = card.slot();
        assert_eq!(slot.stage, Stage::Submitted);
        assert_eq!(slot.position, 7);
    }

    #[test]
    fn test_overdue_requires_past_deadline() {
        let now = Utc::now();
        let card = Card::new("Test", Stage::Writing, 0);
        assert!(!card.is_overdue(now));

        let card = card.with_deadline(now - Duration::days(1));
        assert!(card.is_overdue(now));

        let future = Card::new("Test", Stage::Writing, 0).with_deadline(now + Duration::days(1));
        assert!(!future.is_overdue(now));
    }

    #[test]
    fn test_terminal_stages_are_never_overdue() {
        let now = Utc::now();
        let card =
            Card::new("Test", Stage::Awarded, 0).with_deadline(now - Duration::days(30));
        assert!(!card.is_overdue(now));
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new("Test", Stage::Writing, 1).with_funder("NIH");
        let json = serde_json::to_string(&card).unwrap();
        let parsed: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn test_card_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "app-1",
            "title": "Sloan fellowship",
            "stage": "submitted",
            "position": 2
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.deadline.is_none());
        assert!(!card.archived);
    }
}
