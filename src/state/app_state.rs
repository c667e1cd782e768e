//! Application state and routing.
//!
//! AppState is the root state type. It holds the active route, the signed-in
//! user and the per-screen state. Transitions are plain methods; side effects
//! (session calls, fetches) are driven by the view layer.

use super::{DashboardState, LoginForm};
use crate::auth::User;
use crate::model::PageSize;

// ===== Route =====

/// The two screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Public login form.
    #[default]
    Login,
    /// Book list; requires a session.
    Dashboard,
}

impl Route {
    /// URL-style path shown in the breadcrumb.
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard/home",
        }
    }
}

// ===== AppState =====

/// Root state: route, session user and per-screen state.
#[derive(Debug, Clone)]
pub struct AppState {
    route: Route,

    /// Present exactly while on the dashboard.
    user: Option<User>,

    /// Login form fields.
    pub login: LoginForm,

    /// Book-list screen state.
    pub dashboard: DashboardState,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    /// Transient message for the dashboard status bar.
    pub status_message: Option<String>,

    /// Records per page a fresh dashboard starts with.
    initial_page_size: PageSize,
}

impl AppState {
    /// Signed-out state on the login route.
    pub fn new(initial_page_size: PageSize) -> Self {
        Self {
            route: Route::Login,
            user: None,
            login: LoginForm::new(),
            dashboard: DashboardState::new(initial_page_size),
            help_visible: false,
            status_message: None,
            initial_page_size,
        }
    }

    /// Active screen.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Signed-in user, present only on the dashboard.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Switch to the dashboard for `user` with a fresh listing.
    pub fn enter_dashboard(&mut self, user: User) {
        self.user = Some(user);
        self.route = Route::Dashboard;
        self.login = LoginForm::new();
        self.dashboard = DashboardState::new(self.initial_page_size);
        self.status_message = None;
    }

    /// Return to the login form, discarding the dashboard and user.
    pub fn enter_login(&mut self) {
        self.user = None;
        self.route = Route::Login;
        self.login = LoginForm::new();
        self.dashboard = DashboardState::new(self.initial_page_size);
        self.help_visible = false;
        self.status_message = None;
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Replace the status bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
