//! Session state types

use serde::{Deserialize, Serialize};

/// Which screen the session is on and who/what is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Role selection
    #[default]
    NoUserSelected,

    /// A user is active but has not started a conversation
    UserSelected { user_id: String },

    /// Composing into a conversation
    ConversationActive {
        user_id: String,
        conversation_id: String,
    },
}

impl SessionState {
    pub fn active_user_id(&self) -> Option<&str> {
        match self {
            SessionState::NoUserSelected => None,
            SessionState::UserSelected { user_id }
            | SessionState::ConversationActive { user_id, .. } => Some(user_id),
        }
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        match self {
            SessionState::ConversationActive {
                conversation_id, ..
            } => Some(conversation_id),
            _ => None,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::NoUserSelected => "no_user_selected",
            SessionState::UserSelected { .. } => "user_selected",
            SessionState::ConversationActive { .. } => "conversation_active",
        }
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Ids of users that may be selected
    pub roster: Vec<String>,
    /// Participant paired with the active user on conversation start
    pub placeholder_participant: String,
}

/// Placeholder participant used when none is configured
pub const DEFAULT_PLACEHOLDER_PARTICIPANT: &str = "0";

impl SessionContext {
    pub fn new(roster: Vec<String>, placeholder_participant: impl Into<String>) -> Self {
        Self {
            roster,
            placeholder_participant: placeholder_participant.into(),
        }
    }

    pub fn knows_user(&self, user_id: &str) -> bool {
        self.roster.iter().any(|id| id == user_id)
    }
}
