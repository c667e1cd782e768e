//! Login form state.

use super::text_input::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, TextInput,
};

/// Inline message shown after a rejected login.
pub const LOGIN_FAILED_MESSAGE: &str =
    "Login failed. Please check your credentials and try again.";

/// Which field receives typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    /// Email address field.
    #[default]
    Email,
    /// Masked password field.
    Password,
}

impl LoginField {
    /// The other field.
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

/// Email/password form with an optional error line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: TextInput,
    password: TextInput,
    focus: LoginField,
    error: Option<String>,
}

impl LoginForm {
    /// Empty form focused on the email field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Email input.
    pub fn email(&self) -> &TextInput {
        &self.email
    }

    /// Password input.
    pub fn password(&self) -> &TextInput {
        &self.password
    }

    /// Field receiving input.
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    /// Inline error after a rejected login.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current `(email, password)` pair for submission.
    pub fn credentials(&self) -> (&str, &str) {
        (self.email.value(), self.password.value())
    }

    /// Move focus to the other field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Type `ch` into the focused field.
    pub fn insert_char(&mut self, ch: char) {
        self.edit(|input| handle_char_input(input, ch));
    }

    /// Delete the character before the cursor in the focused field.
    pub fn backspace(&mut self) {
        self.edit(handle_backspace);
    }

    /// Move the focused field's cursor left.
    pub fn cursor_left(&mut self) {
        self.edit(handle_cursor_left);
    }

    /// Move the focused field's cursor right.
    pub fn cursor_right(&mut self) {
        self.edit(handle_cursor_right);
    }

    /// Record a rejected submission. Field contents are kept.
    pub fn fail(&mut self) {
        self.error = Some(LOGIN_FAILED_MESSAGE.to_string());
    }

    fn edit(&mut self, f: impl FnOnce(TextInput) -> TextInput) {
        let field = match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        };
        *field = f(std::mem::take(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut LoginForm, text: &str) {
        text.chars().for_each(|c| form.insert_char(c));
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "a@b.c");
        form.focus_next();
        type_str(&mut form, "pw");

        assert_eq!(form.credentials(), ("a@b.c", "pw"));
        assert_eq!(form.focus(), LoginField::Password);
    }

    #[test]
    fn focus_cycles_between_fields() {
        let mut form = LoginForm::new();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), LoginField::Email);
    }

    #[test]
    fn backspace_edits_only_focused_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "ab");
        form.focus_next();
        type_str(&mut form, "cd");
        form.backspace();

        assert_eq!(form.credentials(), ("ab", "c"));
    }

    #[test]
    fn fail_sets_inline_error_and_keeps_input() {
        let mut form = LoginForm::new();
        type_str(&mut form, "me@example.com");
        form.fail();

        assert_eq!(form.error(), Some(LOGIN_FAILED_MESSAGE));
        assert_eq!(form.email().value(), "me@example.com");
    }
}
