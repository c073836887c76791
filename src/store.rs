//! In-memory chat store
//!
//! Single source of truth for messages. Each message payload is stored once;
//! conversations own an ordered list of message ids instead of copies.

use crate::model::{Conversation, Message, Role, User};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
    #[error("Conversation already exists: {0}")]
    DuplicateConversation(String),
    #[error("Message already exists: {0}")]
    DuplicateMessage(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    users: Vec<User>,
    /// Conversations in creation order
    conversations: Vec<Conversation>,
    messages: HashMap<String, Message>,
    /// Message ids in append order across all conversations
    message_order: Vec<String>,
    /// Conversation id -> ordered message ids
    by_conversation: HashMap<String, Vec<String>>,
}

impl ChatStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    // ==================== Users ====================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// First roster entry with the given role
    pub fn user_for_role(&self, role: Role) -> StoreResult<&User> {
        self.users
            .iter()
            .find(|u| u.role == role)
            .ok_or_else(|| StoreError::UserNotFound(role.to_string()))
    }

    // ==================== Conversations ====================

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> StoreResult<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::ConversationNotFound(id.to_string()))
    }

    pub fn create_conversation(&mut self, conversation: Conversation) -> StoreResult<()> {
        if self.by_conversation.contains_key(&conversation.id) {
            return Err(StoreError::DuplicateConversation(conversation.id));
        }
        self.by_conversation
            .insert(conversation.id.clone(), Vec::new());
        self.conversations.push(conversation);
        Ok(())
    }

    // ==================== Messages ====================

    /// Append a message to the flat list and to its conversation's index
    pub fn append_message(&mut self, message: Message) -> StoreResult<()> {
        if self.messages.contains_key(&message.id) {
            return Err(StoreError::DuplicateMessage(message.id));
        }
        let Some(ids) = self.by_conversation.get_mut(&message.conversation_id) else {
            return Err(StoreError::ConversationNotFound(message.conversation_id));
        };
        ids.push(message.id.clone());
        self.message_order.push(message.id.clone());
        self.messages.insert(message.id.clone(), message);
        Ok(())
    }

    /// All messages in append order
    #[allow(dead_code)] // Used in tests
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.message_order
            .iter()
            .filter_map(|id| self.messages.get(id))
    }

    /// Messages of one conversation in send order. Empty for unknown ids.
    pub fn conversation_messages(&self, conversation_id: &str) -> Vec<&Message> {
        self.by_conversation
            .get(conversation_id)
            .map(|ids| ids.iter().filter_map(|id| self.messages.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.message_order.len()
    }
}
