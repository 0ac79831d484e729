//! Node identifier newtype with a smart constructor.
//!
//! Identifiers validate non-empty strings at construction time.
//! The raw constructor is never exported - use [`NodeId::new`] or serde.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved identity of the invisible aggregation root.
///
/// A tree whose root carries this id bundles several top-level entities
/// under one parent that is never rendered itself.
pub const SYNTHETIC_ROOT_ID: &str = "synthetic-root";

/// Identity of a node within one tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Smart constructor: validates non-empty id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidNodeId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidNodeId::Empty);
        }
        Ok(Self(raw))
    }

    /// The synthetic root identity.
    pub fn synthetic_root() -> Self {
        Self(SYNTHETIC_ROOT_ID.to_string())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved synthetic root identity.
    pub fn is_synthetic_root(&self) -> bool {
        self.0 == SYNTHETIC_ROOT_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = InvalidNodeId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ===== Error Types =====

/// Rejected node id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNodeId {
    /// The id was the empty string.
    #[error("Node ID cannot be empty")]
    Empty,
}

// ===== Tests =====
