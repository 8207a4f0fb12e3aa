//! Remote store boundary.
//!
//! The engine consumes the authoritative persistence collaborator through
//! this seam. It never predicts the store's final ordering: success from
//! [`RemoteStore::reorder`] is a bare acknowledgement, and the next
//! [`RemoteStore::fetch_board`] is the source of truth for positions.

use crate::error::Result;
use crate::types::{Board, MoveCommand, Priority, Stage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Predicate set owned by the excluded filter UI.
///
/// Opaque to the engine: it is forwarded verbatim on every fetch, and any
/// change triggers a new fetch plus a full board replacement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub include_archived: bool,
}

impl BoardFilter {
    /// Filter matching everything except archived cards
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the given stages
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = Some(stages);
        self
    }

    /// Restrict to one priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restrict to cards whose title or funder contains the given text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Include archived cards
    pub fn with_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }
}

/// The authoritative persistence collaborator.
///
/// Failures from `reorder` are classified through [`crate::BoardError`]:
/// `Rejected` with `not_found` or `invalid_target` for stale requests, and
/// `Transient` for network-level trouble. The engine responds to all of them
/// the same way: rollback, no automatic retry.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch a complete board snapshot for the given filter
    async fn fetch_board(&self, filter: &BoardFilter) -> Result<Board>;

    /// Request a reorder. Success returns nothing beyond the acknowledgement;
    /// the next fetch is the source of truth for final positions.
    async fn reorder(&self, command: &MoveCommand) -> Result<()>;
}
