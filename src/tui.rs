//! Terminal front end
//!
//! Renders the session as one of three screens and feeds key presses back
//! into it. All state lives in the [`Session`]; this module only keeps the
//! role highlight and the quit flag.

mod input;
mod render;

pub use input::{key_to_action, Action, Screen};

use crate::ids::IdGenerator;
use crate::model::Role;
use crate::session::{Session, SessionResult};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::io;

pub struct App<G: IdGenerator> {
    session: Session<G>,
    /// Highlighted button on the role screen
    highlighted_role: Role,
    should_quit: bool,
}

impl<G: IdGenerator> App<G> {
    pub fn new(session: Session<G>) -> Self {
        Self {
            session,
            highlighted_role: Role::Patient,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session<G> {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        Screen::from(self.session.state())
    }

    pub fn highlighted_role(&self) -> Role {
        self.highlighted_role
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = key_to_action(self.screen(), key) {
            self.apply(action);
        }
    }

    /// Pasted text goes into the draft, and only while a conversation is open
    pub fn paste(&mut self, text: &str) {
        if self.screen() == Screen::Conversation {
            text.chars().for_each(|c| self.apply(Action::Type(c)));
        }
    }

    pub fn apply(&mut self, action: Action) {
        let result = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::ToggleRole => {
                self.highlighted_role = match self.highlighted_role {
                    Role::Patient => Role::Doctor,
                    Role::Doctor => Role::Patient,
                };
                Ok(())
            }
            Action::ChooseRole(role) => self.session.select_role(role),
            Action::ChooseHighlighted => self.session.select_role(self.highlighted_role),
            Action::StartConversation => self.session.start_conversation().map(|_| ()),
            Action::Type(c) => {
                self.session.push_draft_char(c);
                Ok(())
            }
            Action::Backspace => {
                self.session.pop_draft_char();
                Ok(())
            }
            Action::Send => self.session.send_message().map(|_| ()),
            Action::Leave => {
                self.highlighted_role = Role::Patient;
                self.session.leave()
            }
        };
        self.report(result);
    }

    /// Rejections are expected (e.g. Enter on an empty input) and stay silent
    fn report(&self, result: SessionResult<()>) {
        if let Err(e) = result {
            if !e.is_rejection() {
                tracing::error!(error = %e, state = self.session.state().name(), "Session operation failed");
            }
        }
    }
}

/// Run the UI until the user quits
pub fn run<G: IdGenerator>(session: Session<G>) -> io::Result<()> {
    let mut app = App::new(session);
    let mut terminal = ratatui::init();
    // ratatui::init leaves bracketed paste off, without it no Paste events arrive
    let result = execute!(io::stdout(), EnableBracketedPaste)
        .and_then(|()| run_loop(&mut terminal, &mut app));
    if let Err(e) = execute!(io::stdout(), DisableBracketedPaste) {
        tracing::warn!(error = %e, "Failed to disable bracketed paste");
    }
    ratatui::restore();
    result
}

fn run_loop<G: IdGenerator>(terminal: &mut DefaultTerminal, app: &mut App<G>) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| render::draw(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Paste(text) => app.paste(&text),
            _ => {}
        }
    }
    Ok(())
}
