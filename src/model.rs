//! Chat records
//!
//! Users, conversations and messages held by the session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user plays in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Patient, Role::Doctor];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seeded participant. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// First character of the display name, upper-cased (avatar label)
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// A sent message. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub conversation_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Conversation record
///
/// Messages are not embedded here; the store keeps an ordered index of
/// message ids per conversation and resolves them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
}
