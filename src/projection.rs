//! Read-only conversation view
//!
//! Resolves each message of a conversation against the roster for display.
//! Missing senders degrade to an absent name instead of failing.

use crate::store::ChatStore;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

/// date-fns `Pp`: short localized date plus short time
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %-I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub message_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    /// Avatar letter
    pub initial: Option<char>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageView {
    /// Timestamp in the local time zone
    pub fn formatted_time(&self) -> String {
        format_timestamp(&self.timestamp.with_timezone(&Local))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConversationView {
    pub conversation_id: String,
    pub messages: Vec<MessageView>,
}

impl ConversationView {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Project the messages of `conversation_id` in send order
pub fn project(store: &ChatStore, conversation_id: &str) -> ConversationView {
    let messages = store
        .conversation_messages(conversation_id)
        .into_iter()
        .map(|msg| {
            let sender = store.find_user(&msg.sender_id);
            if sender.is_none() {
                tracing::warn!(
                    message_id = %msg.id,
                    sender_id = %msg.sender_id,
                    conv_id = %conversation_id,
                    "Message sender not in roster"
                );
            }
            MessageView {
                message_id: msg.id.clone(),
                sender_id: msg.sender_id.clone(),
                sender_name: sender.map(|u| u.name.clone()),
                initial: sender.and_then(crate::model::User::initial),
                content: msg.content.clone(),
                timestamp: msg.timestamp,
            }
        })
        .collect();

    ConversationView {
        conversation_id: conversation_id.to_string(),
        messages,
    }
}
