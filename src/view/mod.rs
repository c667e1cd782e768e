//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod dashboard;
mod help;
mod login;
mod styles;

pub use dashboard::render_dashboard;
pub use help::render_help_overlay;
pub use login::render_login;
pub use styles::{ColorConfig, Palette};

use crate::auth::AuthProvider;
use crate::catalog::CatalogClient;
use crate::config::KeyBindings;
use crate::enrich::Dispatcher;
use crate::model::{AppError, KeyAction, PageSize};
use crate::projection::write_export;
use crate::state::{AppState, ListingStatus, Route};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, backend::Backend, Frame, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Interval at which background results are drained when no input arrives.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Startup options for [`TuiApp`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Records per page when the dashboard opens.
    pub page_size: PageSize,
    /// Directory receiving `books.csv`.
    pub export_dir: PathBuf,
    /// Whether to render with colors.
    pub colors: ColorConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            export_dir: PathBuf::from("."),
            colors: ColorConfig::enabled(true),
        }
    }
}

/// Render one frame for `state`.
pub fn render_app(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let area = frame.area();
    match state.route() {
        Route::Login => render_login(frame, area, &state.login, palette),
        Route::Dashboard => render_dashboard(frame, area, state, palette),
    }
    if state.help_visible {
        render_help_overlay(frame, palette);
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    auth: Box<dyn AuthProvider>,
    catalog: Arc<dyn CatalogClient>,
    /// Present while the dashboard is open. Dropping it detaches in-flight calls.
    dispatcher: Option<Dispatcher>,
    key_bindings: KeyBindings,
    palette: Palette,
    export_dir: PathBuf,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal in raw mode with alternate screen.
    pub fn new(
        auth: Box<dyn AuthProvider>,
        catalog: Arc<dyn CatalogClient>,
        settings: AppSettings,
    ) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, auth, catalog, settings))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), AppError> {
        self.start();
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(..) => {}
                    _ => continue,
                }
                self.tick();
                self.draw()?;
            } else if self.tick() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an existing terminal. Does not touch the session.
    pub fn with_terminal(
        terminal: Terminal<B>,
        auth: Box<dyn AuthProvider>,
        catalog: Arc<dyn CatalogClient>,
        settings: AppSettings,
    ) -> Self {
        Self {
            terminal,
            app_state: AppState::new(settings.page_size),
            auth,
            catalog,
            dispatcher: None,
            key_bindings: KeyBindings::default(),
            palette: Palette::with_color_config(settings.colors),
            export_dir: settings.export_dir,
        }
    }

    /// Current screen state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Skip the login form when a session already exists.
    pub fn start(&mut self) {
        self.navigate(Route::Dashboard);
    }

    /// Go to `route`, enforcing the session guard on the dashboard.
    ///
    /// Without a session the dashboard silently redirects to login.
    pub fn navigate(&mut self, route: Route) {
        match route {
            Route::Login => {
                self.dispatcher = None;
                self.app_state.enter_login();
            }
            Route::Dashboard => match self.auth.current_user() {
                Ok(user) => self.open_dashboard(user),
                Err(e) => {
                    debug!(error = %e, "No session; showing login");
                    self.navigate(Route::Login);
                }
            },
        }
        debug!(path = self.app_state.route().path(), "Route changed");
    }

    fn open_dashboard(&mut self, user: crate::auth::User) {
        info!(user = %user.id, "Opening dashboard");
        self.app_state.enter_dashboard(user);
        let dispatcher = Dispatcher::new(Arc::clone(&self.catalog));
        dispatcher.fetch_reading_log();
        self.dispatcher = Some(dispatcher);
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing into the login form
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.app_state.route() {
            Route::Login => self.handle_login_key(key),
            Route::Dashboard => self.handle_dashboard_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        let form = &mut self.app_state.login;
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.focus_next(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Left => form.cursor_left(),
            KeyCode::Right => form.cursor_right(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.insert_char(ch)
            }
            _ => {}
        }
        false
    }

    /// Open a session with the form's credentials, then enter the dashboard.
    fn submit_login(&mut self) {
        let (email, password) = self.app_state.login.credentials();
        let (email, password) = (email.to_string(), password.to_string());

        let user = self
            .auth
            .create_session(&email, &password)
            .and_then(|_| self.auth.current_user());

        match user {
            Ok(user) => self.open_dashboard(user),
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.app_state.login.fail();
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
        if self.app_state.help_visible && key.code == KeyCode::Esc {
            self.app_state.help_visible = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let dashboard = &mut self.app_state.dashboard;
        match action {
            KeyAction::SelectNextRow => dashboard.select_next_row(),
            KeyAction::SelectPrevRow => dashboard.select_prev_row(),
            KeyAction::NextPage => dashboard.next_page(),
            KeyAction::PrevPage => dashboard.prev_page(),
            KeyAction::FirstPage => dashboard.first_page(),
            KeyAction::LastPage => dashboard.last_page(),
            KeyAction::CyclePageSize => dashboard.cycle_page_size(),
            KeyAction::SortBy(field) => dashboard.set_sort(field),
            KeyAction::Export => self.export(),
            KeyAction::Logout => self.logout(),
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::Quit => return true,
        }
        false
    }

    /// Write the visible page to `books.csv`.
    fn export(&mut self) {
        let Some(projection) = self.app_state.dashboard.projection() else {
            self.app_state.set_status("Nothing to export yet");
            return;
        };

        match write_export(&self.export_dir, &projection.rows) {
            Ok(path) => self.app_state.set_status(format!(
                "Exported {} rows to {}",
                projection.rows.len(),
                path.display()
            )),
            Err(e) => {
                error!(error = %e, "Export failed");
                self.app_state.set_status(format!("Export failed: {e}"));
            }
        }
    }

    /// Close the session and return to login. A failed logout stays put.
    fn logout(&mut self) {
        match self.auth.delete_session() {
            Ok(()) => {
                info!("Logged out");
                self.navigate(Route::Login);
            }
            Err(e) => {
                warn!(error = %e, "Logout failed");
                self.app_state.set_status("Logout failed");
            }
        }
    }

    /// Fold finished background calls into state and issue follow-up lookups.
    ///
    /// Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        let Some(dispatcher) = &self.dispatcher else {
            return false;
        };
        let completions = dispatcher.drain();
        if completions.is_empty() {
            return false;
        }

        let dashboard = &mut self.app_state.dashboard;
        for completion in completions {
            dashboard.apply(completion);
        }
        for request in dashboard.begin_lookups() {
            dispatcher.dispatch(request);
        }
        true
    }

    /// Block until the listing has settled and no lookups are in flight, or
    /// until `timeout` elapses. Returns true if everything settled.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let dashboard = &self.app_state.dashboard;
            let settled = !matches!(dashboard.listing(), ListingStatus::Loading)
                && dashboard.facts().pending_count() == 0;
            if settled {
                return true;
            }

            let Some(dispatcher) = &self.dispatcher else {
                return false;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(completion) = dispatcher.recv_timeout(remaining) {
                let dashboard = &mut self.app_state.dashboard;
                dashboard.apply(completion);
                for request in dashboard.begin_lookups() {
                    dispatcher.dispatch(request);
                }
            }
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let state = &self.app_state;
        let palette = &self.palette;
        self.terminal
            .draw(|frame| render_app(frame, state, palette))?;
        Ok(())
    }
}

/// Build the terminal app, run it, and always restore the terminal.
///
/// Logging must be initialized by the caller.
pub fn run_dashboard(
    auth: Box<dyn AuthProvider>,
    catalog: Arc<dyn CatalogClient>,
    settings: AppSettings,
) -> Result<(), AppError> {
    let result = TuiApp::new(auth, catalog, settings).and_then(|mut app| app.run());

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
