//! Drawing for the three screens

use super::{App, Screen};
use crate::ids::IdGenerator;
use crate::model::Role;
use crate::projection::{ConversationView, MessageView};
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const AVATAR_WIDTH: usize = 4;

pub fn draw<G: IdGenerator>(frame: &mut Frame, app: &App<G>) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" carechat ");
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    match app.screen() {
        Screen::RoleSelect => draw_role_select(frame, inner, app.highlighted_role()),
        Screen::Welcome => {
            let name = app
                .session()
                .active_user()
                .map_or("", |u| u.name.as_str());
            draw_welcome(frame, inner, name);
        }
        Screen::Conversation => {
            let view = app.session().view().unwrap_or_default();
            draw_conversation(frame, inner, &view, app.session().draft());
        }
    }
}

fn button(label: &str, highlighted: bool) -> Span<'static> {
    let style = if highlighted {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn hint(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn draw_role_select(frame: &mut Frame, area: Rect, highlighted: Role) {
    let buttons: Vec<Span> = Role::ALL
        .iter()
        .flat_map(|role| [button(role.as_str(), *role == highlighted), Span::raw("   ")])
        .collect();

    let text = Text::from(vec![
        Line::styled(
            "Select Your Role",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(buttons),
        Line::default(),
        hint("←/→ move  Enter choose  p/d shortcut  Esc quit"),
    ]);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        centered(area, 5),
    );
}

fn draw_welcome(frame: &mut Frame, area: Rect, name: &str) {
    let text = Text::from(vec![
        Line::styled(
            format!("Welcome, {name}!"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(button("Start a new conversation", true)),
        Line::default(),
        hint("Enter start  Esc leave  Ctrl-C quit"),
    ]);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        centered(area, 5),
    );
}

fn draw_conversation(frame: &mut Frame, area: Rect, view: &ConversationView, draft: &str) {
    let [header, messages, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let [title, leave] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(12)]).areas(header);
    frame.render_widget(
        Paragraph::new(Line::styled(
            "Conversation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title,
    );
    frame.render_widget(
        Paragraph::new(hint("Esc Leave")).alignment(Alignment::Right),
        leave,
    );

    let list = Block::default().borders(Borders::ALL);
    let list_inner = list.inner(messages);
    frame.render_widget(list, messages);

    if view.is_empty() {
        frame.render_widget(Paragraph::new(hint("No messages yet")), list_inner);
    } else {
        let lines = message_lines(view, usize::from(list_inner.width));
        // Keep the newest message in sight
        let overflow = lines.len().saturating_sub(usize::from(list_inner.height));
        let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), list_inner);
    }

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(" Message ")
        .title_bottom(hint(" Enter send "));
    let input_inner = input_block.inner(input);
    // Show the tail of long drafts
    let visible = tail(draft, usize::from(input_inner.width.saturating_sub(1)));
    frame.render_widget(Paragraph::new(visible.clone()).block(input_block), input);

    let cursor_x = u16::try_from(visible.width()).unwrap_or(0);
    frame.set_cursor_position(Position::new(input_inner.x + cursor_x, input_inner.y));
}

fn message_lines(view: &ConversationView, width: usize) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(AVATAR_WIDTH).max(1);
    let mut lines = Vec::new();
    for msg in &view.messages {
        lines.push(message_header(msg));
        for chunk in wrap(&msg.content, body_width) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(AVATAR_WIDTH)),
                Span::raw(chunk),
            ]));
        }
    }
    lines
}

fn message_header(msg: &MessageView) -> Line<'static> {
    let avatar = msg
        .initial
        .map_or_else(|| "(?) ".to_string(), |c| format!("({c}) "));
    Line::from(vec![
        Span::styled(avatar, Style::default().fg(Color::Gray)),
        Span::styled(
            msg.sender_name.clone().unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", msg.formatted_time()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Split into chunks at most `width` columns wide; always yields one chunk
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    chunks.push(current);
    chunks
}

/// The longest suffix of `text` that fits in `width` columns
fn tail(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        start = i;
    }
    text.get(start..).unwrap_or_default().to_string()
}

fn centered(area: Rect, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}
