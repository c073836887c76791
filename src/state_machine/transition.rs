//! Pure state transition function

use super::{Effect, Event, SessionContext, SessionState};
use crate::model::{Conversation, Message};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is rejected. A rejected event leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("A user is already selected")]
    UserAlreadySelected,
    #[error("No active user")]
    NoActiveUser,
    #[error("A conversation is already active")]
    ConversationAlreadyActive,
    #[error("No active conversation")]
    NoActiveConversation,
    #[error("Message is empty")]
    EmptyMessage,
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; all store
/// mutation is expressed as effects.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User selection
        // ============================================================
        (SessionState::NoUserSelected, Event::SelectUser { user_id }) => {
            if !context.knows_user(&user_id) {
                return Err(TransitionError::UnknownUser(user_id));
            }
            Ok(TransitionResult::new(SessionState::UserSelected { user_id }))
        }

        (_, Event::SelectUser { .. }) => Err(TransitionError::UserAlreadySelected),

        // ============================================================
        // Conversation start
        // ============================================================
        (
            SessionState::UserSelected { user_id },
            Event::StartConversation {
                conversation_id,
                created_at,
            },
        ) => {
            let conversation = Conversation {
                id: conversation_id.clone(),
                participants: vec![user_id.clone(), context.placeholder_participant.clone()],
                created_at,
            };
            Ok(TransitionResult::new(SessionState::ConversationActive {
                user_id: user_id.clone(),
                conversation_id,
            })
            .with_effect(Effect::create_conversation(conversation)))
        }

        (SessionState::NoUserSelected, Event::StartConversation { .. }) => {
            Err(TransitionError::NoActiveUser)
        }

        (SessionState::ConversationActive { .. }, Event::StartConversation { .. }) => {
            Err(TransitionError::ConversationAlreadyActive)
        }

        // ============================================================
        // Messaging
        // ============================================================
        (_, Event::SendMessage { content, .. }) if content.is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        (
            SessionState::ConversationActive {
                user_id,
                conversation_id,
            },
            Event::SendMessage {
                message_id,
                content,
                timestamp,
            },
        ) => {
            let message = Message {
                id: message_id,
                sender_id: user_id.clone(),
                conversation_id: conversation_id.clone(),
                content,
                timestamp,
            };
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::append_message(message))
                .with_effect(Effect::ClearDraft))
        }

        (SessionState::NoUserSelected, Event::SendMessage { .. }) => {
            Err(TransitionError::NoActiveUser)
        }

        (SessionState::UserSelected { .. }, Event::SendMessage { .. }) => {
            Err(TransitionError::NoActiveConversation)
        }

        // ============================================================
        // Leave: full reset from any state
        // ============================================================
        (_, Event::Leave) => Ok(TransitionResult::new(SessionState::NoUserSelected)
            .with_effect(Effect::ResetSession)
            .with_effect(Effect::ClearDraft)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_context() -> SessionContext {
        SessionContext::new(vec!["1".to_string(), "2".to_string()], "0")
    }

    fn active() -> SessionState {
        SessionState::ConversationActive {
            user_id: "1".to_string(),
            conversation_id: "c1".to_string(),
        }
    }

    fn send(content: &str) -> Event {
        Event::SendMessage {
            message_id: "m1".to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_select_user() {
        let result = transition(
            &SessionState::NoUserSelected,
            &test_context(),
            Event::SelectUser {
                user_id: "2".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            result.new_state,
            SessionState::UserSelected {
                user_id: "2".to_string()
            }
        );
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_select_unknown_user_rejected() {
        let err = transition(
            &SessionState::NoUserSelected,
            &test_context(),
            Event::SelectUser {
                user_id: "42".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::UnknownUser("42".to_string()));
    }

    #[test]
    fn test_select_user_twice_rejected() {
        let state = SessionState::UserSelected {
            user_id: "1".to_string(),
        };
        let err = transition(
            &state,
            &test_context(),
            Event::SelectUser {
                user_id: "2".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::UserAlreadySelected);
    }

    #[test]
    fn test_start_conversation_pairs_with_placeholder() {
        let state = SessionState::UserSelected {
            user_id: "1".to_string(),
        };
        let result = transition(
            &state,
            &test_context(),
            Event::StartConversation {
                conversation_id: "c9".to_string(),
                created_at: Utc::now(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state.active_conversation_id(), Some("c9"));
        match result.effects.as_slice() {
            [Effect::CreateConversation { conversation }] => {
                assert_eq!(conversation.id, "c9");
                assert_eq!(conversation.participants, vec!["1", "0"]);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_start_conversation_without_user_rejected() {
        let err = transition(
            &SessionState::NoUserSelected,
            &test_context(),
            Event::StartConversation {
                conversation_id: "c".to_string(),
                created_at: Utc::now(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::NoActiveUser);
    }

    #[test]
    fn test_start_conversation_while_active_rejected() {
        let err = transition(
            &active(),
            &test_context(),
            Event::StartConversation {
                conversation_id: "c2".to_string(),
                created_at: Utc::now(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::ConversationAlreadyActive);
    }

    #[test]
    fn test_send_message() {
        let result = transition(&active(), &test_context(), send("hi")).unwrap();
        assert_eq!(result.new_state, active());
        match result.effects.as_slice() {
            [Effect::AppendMessage { message }, Effect::ClearDraft] => {
                assert_eq!(message.sender_id, "1");
                assert_eq!(message.conversation_id, "c1");
                assert_eq!(message.content, "hi");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_message_is_sent() {
        assert!(transition(&active(), &test_context(), send("  ")).is_ok());
    }

    #[test]
    fn test_send_rejections() {
        let ctx = test_context();
        assert_eq!(
            transition(&active(), &ctx, send("")).unwrap_err(),
            TransitionError::EmptyMessage
        );
        assert_eq!(
            transition(&SessionState::NoUserSelected, &ctx, send("x")).unwrap_err(),
            TransitionError::NoActiveUser
        );
        let selected = SessionState::UserSelected {
            user_id: "1".to_string(),
        };
        assert_eq!(
            transition(&selected, &ctx, send("x")).unwrap_err(),
            TransitionError::NoActiveConversation
        );
    }

    #[test]
    fn test_leave_resets() {
        let result = transition(&active(), &test_context(), Event::Leave).unwrap();
        assert_eq!(result.new_state, SessionState::NoUserSelected);
        assert_eq!(result.effects, vec![Effect::ResetSession, Effect::ClearDraft]);
    }
}
