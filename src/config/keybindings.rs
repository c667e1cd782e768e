//! Keyboard bindings for the dashboard.
//!
//! The login form consumes raw characters, so these bindings apply on the
//! dashboard route only.

use crate::model::{KeyAction, SortField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    /// Bind a character that terminals may report with or without SHIFT.
    fn bind_shifted(&mut self, ch: char, action: KeyAction) {
        self.bind(KeyCode::Char(ch), KeyModifiers::SHIFT, action);
        self.bind(KeyCode::Char(ch), KeyModifiers::NONE, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Row cursor
        keys.bind(KeyCode::Char('j'), none, KeyAction::SelectNextRow);
        keys.bind(KeyCode::Down, none, KeyAction::SelectNextRow);
        keys.bind(KeyCode::Char('k'), none, KeyAction::SelectPrevRow);
        keys.bind(KeyCode::Up, none, KeyAction::SelectPrevRow);

        // Pagination
        keys.bind(KeyCode::Char('n'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Right, none, KeyAction::NextPage);
        keys.bind(KeyCode::PageDown, none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('p'), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevPage);
        keys.bind(KeyCode::PageUp, none, KeyAction::PrevPage);
        keys.bind(KeyCode::Char('g'), none, KeyAction::FirstPage);
        keys.bind(KeyCode::Home, none, KeyAction::FirstPage);
        keys.bind_shifted('G', KeyAction::LastPage);
        keys.bind(KeyCode::End, none, KeyAction::LastPage);
        keys.bind(KeyCode::Char('z'), none, KeyAction::CyclePageSize);

        // Sorting: digit N sorts by column N
        for digit in '1'..='9' {
            let column = digit.to_digit(10).map_or(0, |d| d as usize);
            if let Some(field) = SortField::from_column(column) {
                keys.bind(KeyCode::Char(digit), none, KeyAction::SortBy(field));
            }
        }

        // Dashboard
        keys.bind(KeyCode::Char('e'), none, KeyAction::Export);
        keys.bind_shifted('L', KeyAction::Logout);

        // Application controls
        keys.bind_shifted('?', KeyAction::Help);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
