//! Typed identifiers for board entities

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Stable opaque identifier for a card.
///
/// Backed by a ULID so locally created cards sort by creation time, but the
/// engine treats the value as opaque: ids received from the remote store are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generate a new unique id
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing id (e.g. one received from the remote store)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = CardId::new();
        let b = CardId::new();
        assert_ne!(a, b);
        // ULIDs are 26 characters
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn test_from_string_is_verbatim() {
        let id = CardId::from_string("app-42");
        assert_eq!(id.as_str(), "app-42");
        assert_eq!(id.to_string(), "app-42");
    }

    #[test]
    fn test_serde_transparent() {
        let id = CardId::from_string("app-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"app-42\"");
        let parsed: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
