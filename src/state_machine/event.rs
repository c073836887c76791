//! Events that can occur in a session

use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Ids and timestamps are assigned by the runtime before dispatch so the
/// transition function stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectUser {
        user_id: String,
    },
    StartConversation {
        conversation_id: String,
        created_at: DateTime<Utc>,
    },
    SendMessage {
        message_id: String,
        content: String,
        timestamp: DateTime<Utc>,
    },
    /// Discard the session and restore the seeded data
    Leave,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectUser { .. } => "select_user",
            Event::StartConversation { .. } => "start_conversation",
            Event::SendMessage { .. } => "send_message",
            Event::Leave => "leave",
        }
    }
}
