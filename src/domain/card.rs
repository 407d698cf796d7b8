use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a card, unique within a card collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a column on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A draggable card.
///
/// Only `id` and `column_id` matter to the drag engine. Everything the
/// application shows on the card (title, labels, assignee...) lives in
/// `payload` and is carried through moves untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card<P = ()> {
    pub id: CardId,
    pub column_id: ColumnId,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Card<P> {
    pub fn new(id: impl Into<CardId>, column_id: impl Into<ColumnId>, payload: P) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            payload,
        }
    }

    /// Checks if the card currently sits in the given column
    pub fn is_in(&self, column_id: &ColumnId) -> bool {
        &self.column_id == column_id
    }
}

impl Card<()> {
    /// Creates a card without application data
    pub fn bare(id: impl Into<CardId>, column_id: impl Into<ColumnId>) -> Self {
        Self::new(id, column_id, ())
    }
}
