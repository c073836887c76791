//! Key bindings per screen

use crate::model::Role;
use crate::state_machine::SessionState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which of the three mutually exclusive views is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    RoleSelect,
    Welcome,
    Conversation,
}

impl From<&SessionState> for Screen {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::NoUserSelected => Screen::RoleSelect,
            SessionState::UserSelected { .. } => Screen::Welcome,
            SessionState::ConversationActive { .. } => Screen::Conversation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Move the role highlight by one button
    ToggleRole,
    ChooseRole(Role),
    /// Choose the highlighted role
    ChooseHighlighted,
    StartConversation,
    Type(char),
    Backspace,
    Send,
    Leave,
}

pub fn key_to_action(screen: Screen, key: KeyEvent) -> Option<Action> {
    // AltGr arrives as Ctrl+Alt on Windows and produces plain characters
    let shortcut =
        key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT);
    if shortcut {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(Action::Quit),
            _ => None,
        };
    }

    match screen {
        Screen::RoleSelect => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                Some(Action::ToggleRole)
            }
            KeyCode::Enter => Some(Action::ChooseHighlighted),
            KeyCode::Char('p' | 'P') => Some(Action::ChooseRole(Role::Patient)),
            KeyCode::Char('d' | 'D') => Some(Action::ChooseRole(Role::Doctor)),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Welcome => match key.code {
            KeyCode::Enter => Some(Action::StartConversation),
            KeyCode::Esc => Some(Action::Leave),
            _ => None,
        },
        Screen::Conversation => match key.code {
            KeyCode::Enter => Some(Action::Send),
            KeyCode::Esc => Some(Action::Leave),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Type(c)),
            _ => None,
        },
    }
}
