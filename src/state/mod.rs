//! UI state machine (pure).
//!
//! All state transitions are plain functions and methods testable without TUI.

pub mod app_state;
pub mod dashboard;
pub mod fact_store;
pub mod login;
pub mod text_input;

// Re-export for convenience
pub use app_state::{AppState, Route};
pub use dashboard::{DashboardState, ListingStatus};
pub use fact_store::{FactSlot, FactStore};
pub use login::{LoginField, LoginForm, LOGIN_FAILED_MESSAGE};
pub use text_input::TextInput;
