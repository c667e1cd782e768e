//! Session provider.
//!
//! The dashboard only needs three capabilities from the authentication service:
//! look up the current user, open a session from email/password, and close the
//! current session. [`AuthProvider`] is that seam; [`AppwriteAuth`] implements it
//! against the Appwrite account REST API.

pub mod appwrite;

pub use appwrite::AppwriteAuth;

use crate::model::AuthError;
use serde::Deserialize;

/// Signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Account id.
    #[serde(rename = "$id")]
    pub id: String,
    /// Account name; may be empty.
    #[serde(default)]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Name for the header bar: the account name, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// An open session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Session id.
    #[serde(rename = "$id")]
    pub id: String,
    /// Account the session belongs to.
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

/// Authentication capability used by the routes.
pub trait AuthProvider {
    /// The user of the active session.
    ///
    /// # Errors
    ///
    /// `AuthError::Unauthenticated` when there is no session.
    fn current_user(&self) -> Result<User, AuthError>;

    /// Open a session with email and password.
    fn create_session(&mut self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Close the current session.
    fn delete_session(&mut self) -> Result<(), AuthError>;
}
