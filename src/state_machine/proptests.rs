//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new(vec!["1".to_string(), "2".to_string()], "0")
}

fn is_valid_state(state: &SessionState, ctx: &SessionContext) -> bool {
    match state.active_user_id() {
        Some(user_id) => ctx.knows_user(user_id),
        None => true,
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_user_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("1".to_string()), Just("2".to_string()), Just("9".to_string())]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::NoUserSelected),
        arb_user_id().prop_map(|user_id| SessionState::UserSelected { user_id }),
        (arb_user_id(), "[a-z]{8}").prop_map(|(user_id, conversation_id)| {
            SessionState::ConversationActive {
                user_id,
                conversation_id,
            }
        }),
    ]
}

fn arb_timestamp() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (0i64..2_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
}

fn arb_send_event() -> impl Strategy<Value = Event> {
    ("[a-z]{8}", "[a-zA-Z ]{0,20}", arb_timestamp()).prop_map(
        |(message_id, content, timestamp)| Event::SendMessage {
            message_id,
            content,
            timestamp,
        },
    )
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_user_id().prop_map(|user_id| Event::SelectUser { user_id }),
        ("[a-z]{8}", arb_timestamp()).prop_map(|(conversation_id, created_at)| {
            Event::StartConversation {
                conversation_id,
                created_at,
            }
        }),
        arb_send_event(),
        Just(Event::Leave),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: the active user is always on the roster
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut state = SessionState::NoUserSelected;

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                state = result.new_state;
                prop_assert!(is_valid_state(&state, &ctx), "Invalid state: {:?}", state);
            }
        }
    }

    // Invariant 2: empty content never produces a message
    #[test]
    fn prop_empty_message_rejected(state in arb_state(), message_id in "[a-z]{8}") {
        let event = Event::SendMessage {
            message_id,
            content: String::new(),
            timestamp: Utc::now(),
        };
        prop_assert_eq!(
            transition(&state, &test_context(), event).unwrap_err(),
            TransitionError::EmptyMessage
        );
    }

    // Invariant 3: sending outside an active conversation never appends
    #[test]
    fn prop_send_requires_active_conversation(state in arb_state(), event in arb_send_event()) {
        let active = state.active_conversation_id().is_some();
        match transition(&state, &test_context(), event) {
            Ok(result) => {
                prop_assert!(active);
                prop_assert_eq!(result.new_state, state);
            }
            Err(_) => {}
        }
    }

    // Invariant 4: a new conversation pairs the active user with the placeholder
    #[test]
    fn prop_start_conversation_participants(user_id in arb_user_id(), conversation_id in "[a-z]{8}") {
        let state = SessionState::UserSelected { user_id: user_id.clone() };
        let event = Event::StartConversation { conversation_id: conversation_id.clone(), created_at: Utc::now() };
        let result = transition(&state, &test_context(), event).unwrap();

        prop_assert_eq!(result.effects.len(), 1);
        match &result.effects[0] {
            Effect::CreateConversation { conversation } => {
                prop_assert_eq!(&conversation.id, &conversation_id);
                prop_assert_eq!(conversation.participants.clone(), vec![user_id, "0".to_string()]);
            }
            other => prop_assert!(false, "unexpected effect {:?}", other),
        }
    }

    // Invariant 5: leave always returns to role selection with a reset
    #[test]
    fn prop_leave_always_resets(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::Leave).unwrap();
        prop_assert_eq!(result.new_state, SessionState::NoUserSelected);
        prop_assert!(result.effects.contains(&Effect::ResetSession));
    }

    // Invariant 6: appended messages are attributed to the active pair and
    // appear in send order
    #[test]
    fn prop_appends_follow_send_order(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = test_context();
        let mut state = SessionState::NoUserSelected;
        let mut expected = Vec::new();
        let mut appended = Vec::new();

        for event in events {
            let before = state.clone();
            let sent = match &event {
                Event::SendMessage { message_id, content, .. } if !content.is_empty() => Some(message_id.clone()),
                _ => None,
            };
            let Ok(result) = transition(&state, &ctx, event) else { continue };
            if let (Some(id), SessionState::ConversationActive { .. }) = (sent, &before) {
                expected.push(id);
            }
            for effect in &result.effects {
                if let Effect::AppendMessage { message } = effect {
                    prop_assert_eq!(Some(message.sender_id.as_str()), before.active_user_id());
                    prop_assert_eq!(Some(message.conversation_id.as_str()), before.active_conversation_id());
                    appended.push(message.id.clone());
                }
            }
            state = result.new_state;
        }

        prop_assert_eq!(appended, expected);
    }
}
