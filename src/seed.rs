//! Example data loaded at startup and on every session reset

use crate::model::{Conversation, Message, Role, User};
use crate::store::{ChatStore, StoreResult};
use chrono::{DateTime, Utc};

pub const EXAMPLE_CONVERSATION_ID: &str = "1";

pub fn users() -> Vec<User> {
    vec![
        User::new("1", "Alice", Role::Patient),
        User::new("2", "Dr. Bob", Role::Doctor),
    ]
}

/// Build a store holding the roster, the example conversation and its
/// two opening messages, all stamped with `now`.
pub fn seeded_store(now: DateTime<Utc>) -> StoreResult<ChatStore> {
    let mut store = ChatStore::new(users());
    store.create_conversation(Conversation {
        id: EXAMPLE_CONVERSATION_ID.to_string(),
        participants: vec!["1".to_string(), "2".to_string()],
        created_at: now,
    })?;

    for (id, sender_id, content) in [
        ("1", "1", "Hello, doctor!"),
        ("2", "2", "Hello, Alice! How can I help you?"),
    ] {
        store.append_message(Message {
            id: id.to_string(),
            sender_id: sender_id.to_string(),
            conversation_id: EXAMPLE_CONVERSATION_ID.to_string(),
            content: content.to_string(),
            timestamp: now,
        })?;
    }

    Ok(store)
}
