//! Workflow stages for grant applications

use serde::{Deserialize, Serialize};
use std::fmt;

/// One fixed column of the board.
///
/// The set is closed and totally ordered; declaration order is board order.
/// Stages never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Researching,
    Writing,
    Submitted,
    Awarded,
    Rejected,
}

impl Stage {
    /// All stages in board order
    pub const ALL: [Stage; 5] = [
        Stage::Researching,
        Stage::Writing,
        Stage::Submitted,
        Stage::Awarded,
        Stage::Rejected,
    ];

    /// The stage one column to the left, if any
    pub fn prev(self) -> Option<Stage> {
        match self {
            Stage::Researching => None,
            Stage::Writing => Some(Stage::Researching),
            Stage::Submitted => Some(Stage::Writing),
            Stage::Awarded => Some(Stage::Submitted),
            Stage::Rejected => Some(Stage::Awarded),
        }
    }

    /// The stage one column to the right, if any
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Researching => Some(Stage::Writing),
            Stage::Writing => Some(Stage::Submitted),
            Stage::Submitted => Some(Stage::Awarded),
            Stage::Awarded => Some(Stage::Rejected),
            Stage::Rejected => None,
        }
    }

    /// Terminal stages no longer accrue overdue deadlines
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Awarded | Stage::Rejected)
    }

    /// Stable name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Researching => "researching",
            Stage::Writing => "writing",
            Stage::Submitted => "submitted",
            Stage::Awarded => "awarded",
            Stage::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
