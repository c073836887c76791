//! Session runtime
//!
//! Owns the store and the current state machine state. Each operation builds
//! an event, runs the pure transition, then applies the resulting effects.

use crate::config::Config;
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Conversation, Role, User};
use crate::projection::{self, ConversationView};
use crate::seed;
use crate::state_machine::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError,
};
use crate::store::{ChatStore, StoreError};
use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Rejected: {0}")]
    Rejected(#[from] TransitionError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// True when the operation was refused by the state machine rather than failing
    pub fn is_rejection(&self) -> bool {
        matches!(self, SessionError::Rejected(_))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct Session<G: IdGenerator = UuidIds> {
    context: SessionContext,
    state: SessionState,
    store: ChatStore,
    /// Pending input text
    draft: String,
    ids: G,
}

impl Session<UuidIds> {
    pub fn new(config: &Config) -> SessionResult<Self> {
        Self::with_ids(config, UuidIds)
    }
}

impl<G: IdGenerator> Session<G> {
    pub fn with_ids(config: &Config, ids: G) -> SessionResult<Self> {
        let store = seed::seeded_store(Utc::now())?;
        let roster = store.users().iter().map(|u| u.id.clone()).collect();
        let context = SessionContext::new(roster, config.placeholder_participant.clone());

        Ok(Self {
            context,
            state: SessionState::NoUserSelected,
            store,
            draft: String::new(),
            ids,
        })
    }

    // ==================== Queries ====================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn active_user(&self) -> Option<&User> {
        self.state
            .active_user_id()
            .and_then(|id| self.store.find_user(id))
    }

    #[allow(dead_code)] // State query utility
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.state
            .active_conversation_id()
            .and_then(|id| self.store.conversation(id).ok())
    }

    /// Projection of the active conversation
    pub fn view(&self) -> Option<ConversationView> {
        self.state
            .active_conversation_id()
            .map(|id| projection::project(&self.store, id))
    }

    /// JSON dump of the state and the active view, for debugging
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state,
            "draft": self.draft,
            "view": self.view(),
        })
    }

    // ==================== Input binding ====================

    #[allow(dead_code)] // Used in tests
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_draft_char(&mut self) {
        self.draft.pop();
    }

    // ==================== Operations ====================

    /// Select the seeded user that plays `role`
    pub fn select_role(&mut self, role: Role) -> SessionResult<()> {
        let user_id = self.store.user_for_role(role)?.id.clone();
        self.select_user(user_id)
    }

    pub fn select_user(&mut self, user_id: impl Into<String>) -> SessionResult<()> {
        self.dispatch(Event::SelectUser {
            user_id: user_id.into(),
        })
    }

    /// Start a conversation for the active user; returns its id
    pub fn start_conversation(&mut self) -> SessionResult<String> {
        let conversation_id = self.ids.next_id();
        self.dispatch(Event::StartConversation {
            conversation_id: conversation_id.clone(),
            created_at: Utc::now(),
        })?;
        Ok(conversation_id)
    }

    /// Send the pending draft; returns the new message id
    pub fn send_message(&mut self) -> SessionResult<String> {
        let content = self.draft.clone();
        self.send(content)
    }

    pub fn send(&mut self, content: impl Into<String>) -> SessionResult<String> {
        let message_id = self.ids.next_id();
        self.dispatch(Event::SendMessage {
            message_id: message_id.clone(),
            content: content.into(),
            timestamp: Utc::now(),
        })?;
        Ok(message_id)
    }

    /// Discard everything and return to role selection with seeded data
    pub fn leave(&mut self) -> SessionResult<()> {
        self.dispatch(Event::Leave)
    }

    fn dispatch(&mut self, event: Event) -> SessionResult<()> {
        let event_name = event.name();
        let result = transition(&self.state, &self.context, event).map_err(|e| {
            tracing::debug!(event = event_name, state = self.state.name(), error = %e, "Event rejected");
            e
        })?;

        // Effects first: a store failure leaves the previous state in place
        for effect in result.effects {
            self.execute_effect(effect)?;
        }

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        if old_state != self.state {
            tracing::info!(
                event = event_name,
                from = old_state.name(),
                to = self.state.name(),
                user_id = self.state.active_user_id().unwrap_or(""),
                "Session state changed"
            );
            tracing::debug!(snapshot = %self.snapshot(), "Session snapshot");
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) -> SessionResult<()> {
        match effect {
            Effect::CreateConversation { conversation } => {
                tracing::info!(
                    conv_id = %conversation.id,
                    participants = ?conversation.participants,
                    "Conversation created"
                );
                self.store.create_conversation(conversation)?;
            }
            Effect::AppendMessage { message } => {
                tracing::debug!(
                    message_id = %message.id,
                    conv_id = %message.conversation_id,
                    sender_id = %message.sender_id,
                    "Message appended"
                );
                self.store.append_message(message)?;
            }
            Effect::ClearDraft => self.draft.clear(),
            Effect::ResetSession => {
                self.store = seed::seeded_store(Utc::now())?;
                tracing::info!("Session reset to seeded data");
            }
        }
        Ok(())
    }
}
