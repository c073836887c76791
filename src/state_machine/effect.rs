//! Effects produced by state transitions

use crate::model::{Conversation, Message};

/// Effects to be applied to the store after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add a new conversation
    CreateConversation { conversation: Conversation },

    /// Append a message to the flat list and its conversation
    AppendMessage { message: Message },

    /// Empty the pending input
    ClearDraft,

    /// Drop all session data and reload the seeded defaults
    ResetSession,
}

impl Effect {
    pub fn create_conversation(conversation: Conversation) -> Self {
        Effect::CreateConversation { conversation }
    }

    pub fn append_message(message: Message) -> Self {
        Effect::AppendMessage { message }
    }
}
