//! Login card.

use super::constants::{LOGIN_CARD_HEIGHT, LOGIN_CARD_WIDTH};
use super::help::centered_fixed;
use super::styles::Palette;
use crate::state::{LoginField, LoginForm, TextInput};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Render the login form centered in `area`.
///
/// Places the terminal cursor in the focused field.
pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm, palette: &Palette) {
    let card = centered_fixed(LOGIN_CARD_WIDTH, LOGIN_CARD_HEIGHT, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Login ", palette.title));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [description, email_label, email_input, password_label, password_input, error, submit] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

    frame.render_widget(
        Paragraph::new("Enter your email below to login to your account.")
            .style(palette.muted)
            .wrap(Wrap { trim: true }),
        description,
    );

    frame.render_widget(Paragraph::new("Email"), email_label);
    render_input(
        frame,
        email_input,
        form.email().value().to_string(),
        form.email(),
        form.focus() == LoginField::Email,
        palette,
    );

    frame.render_widget(Paragraph::new("Password"), password_label);
    render_input(
        frame,
        password_input,
        form.password().masked(),
        form.password(),
        form.focus() == LoginField::Password,
        palette,
    );

    if let Some(message) = form.error() {
        frame.render_widget(
            Paragraph::new(message)
                .style(palette.error)
                .wrap(Wrap { trim: true }),
            error,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" SUBMIT (Enter) ", palette.button)))
            .alignment(Alignment::Center),
        submit,
    );
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    shown: String,
    input: &TextInput,
    focused: bool,
    palette: &Palette,
) {
    let block = Block::default().borders(Borders::ALL).border_style(if focused {
        palette.focused_input
    } else {
        palette.muted
    });
    let inner = block.inner(area);

    // Keep the cursor visible by scrolling long values horizontally.
    let width = inner.width.max(1) as usize;
    let chars: Vec<char> = shown.chars().collect();
    let cursor = input.cursor().min(chars.len());
    let mut offset = 0;
    while offset < cursor && columns(&chars[offset..cursor]) >= width {
        offset += 1;
    }
    let visible: String = chars[offset..].iter().collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + columns(&chars[offset..cursor]) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Display width of `chars` in terminal columns.
fn columns(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}
