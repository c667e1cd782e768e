//! Single-line text input (pure state transitions).
//!
//! Used by the login form fields. The cursor counts characters, not bytes, so
//! multi-byte input edits correctly.

/// Editable text with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// One mask character per input character.
    pub fn masked(&self) -> String {
        "•".repeat(self.value.chars().count())
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Insert `ch` at the cursor and advance the cursor.
pub fn handle_char_input(input: TextInput, ch: char) -> TextInput {
    let at = input.byte_offset(input.cursor);
    let TextInput { mut value, cursor } = input;
    value.insert(at, ch);
    TextInput {
        value,
        cursor: cursor + 1,
    }
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(input: TextInput) -> TextInput {
    if input.cursor == 0 {
        return input;
    }
    let start = input.byte_offset(input.cursor - 1);
    let end = input.byte_offset(input.cursor);
    let TextInput { mut value, cursor } = input;
    value.replace_range(start..end, "");
    TextInput {
        value,
        cursor: cursor - 1,
    }
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(input: TextInput) -> TextInput {
    TextInput {
        cursor: input.cursor.saturating_sub(1),
        ..input
    }
}

/// Move the cursor right, saturating at the end of the value.
pub fn handle_cursor_right(input: TextInput) -> TextInput {
    let max_cursor = input.value.chars().count();
    TextInput {
        cursor: (input.cursor + 1).min(max_cursor),
        ..input
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "text_input_tests.rs"]
mod tests;
