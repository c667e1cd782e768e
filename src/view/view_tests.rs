//! Tests for the TUI shell: routing, login, dashboard keys and export.

use super::*;
use crate::auth::{Session, User};
use crate::model::{
    AuthError, AuthorFact, CatalogError, RatingFact, ReadingLog, ReadingLogEntry, SortDirection,
    SortField, SubjectFact, Work, WorkId,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use std::path::Path;

const WAIT: Duration = Duration::from_secs(5);

// ===== Fakes =====

struct FakeAuth {
    session: Option<User>,
    password: &'static str,
    fail_logout: bool,
}

impl FakeAuth {
    fn signed_out() -> Self {
        Self {
            session: None,
            password: "secret",
            fail_logout: false,
        }
    }

    fn signed_in() -> Self {
        Self {
            session: Some(alice()),
            ..Self::signed_out()
        }
    }
}

impl AuthProvider for FakeAuth {
    fn current_user(&self) -> Result<User, AuthError> {
        self.session.clone().ok_or(AuthError::Unauthenticated)
    }

    fn create_session(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email != "alice@example.com" || password != self.password {
            return Err(AuthError::Rejected { status: 401 });
        }
        self.session = Some(alice());
        Ok(Session {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
        })
    }

    fn delete_session(&mut self) -> Result<(), AuthError> {
        if self.fail_logout {
            return Err(AuthError::Network {
                reason: "offline".to_string(),
            });
        }
        self.session = None;
        Ok(())
    }
}

fn alice() -> User {
    User {
        id: "u1".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

/// Serves a fixed listing; every author is unknown to the catalog.
struct FakeCatalog {
    listing: Result<ReadingLog, CatalogError>,
}

impl FakeCatalog {
    fn with_titles(titles: &[&str]) -> Self {
        let entries = titles
            .iter()
            .enumerate()
            .map(|(i, title)| ReadingLogEntry {
                work: Some(Work {
                    key: Some(format!("/works/OL{i}W")),
                    title: title.to_string(),
                    author_names: vec![format!("Author {i}")],
                    first_publish_year: Some(1900 + i as i32),
                    subjects: None,
                }),
            })
            .collect();
        Self {
            listing: Ok(ReadingLog::new(entries)),
        }
    }

    fn failing() -> Self {
        Self {
            listing: Err(CatalogError::Status {
                url: "http://catalog.test".to_string(),
                status: 500,
            }),
        }
    }
}

impl CatalogClient for FakeCatalog {
    fn fetch_reading_log(&self) -> Result<ReadingLog, CatalogError> {
        self.listing.clone()
    }

    fn fetch_author(&self, name: &str) -> Result<AuthorFact, CatalogError> {
        Err(CatalogError::NotFound {
            name: name.to_string(),
        })
    }

    fn fetch_work_rating(&self, _: &WorkId) -> Result<Option<RatingFact>, CatalogError> {
        Ok(RatingFact::from_average(4.25))
    }

    fn fetch_work_detail(&self, _: &WorkId) -> Result<Option<SubjectFact>, CatalogError> {
        Ok(None)
    }
}

// ===== Helpers =====

fn app_with(auth: FakeAuth, catalog: FakeCatalog) -> TuiApp<TestBackend> {
    app_exporting_to(auth, catalog, Path::new("."))
}

fn app_exporting_to(auth: FakeAuth, catalog: FakeCatalog, dir: &Path) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    let settings = AppSettings {
        export_dir: dir.to_path_buf(),
        colors: ColorConfig::enabled(false),
        ..AppSettings::default()
    };
    TuiApp::with_terminal(terminal, Box::new(auth), Arc::new(catalog), settings)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
    for ch in text.chars() {
        assert!(!app.handle_key(key(KeyCode::Char(ch))));
    }
}

fn screen(app: &mut TuiApp<TestBackend>) -> String {
    app.draw().unwrap();
    app.terminal()
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("bookdash-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ===== Routing =====

#[test]
fn start_without_session_shows_login() {
    let mut app = app_with(FakeAuth::signed_out(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    assert_eq!(app.app_state().route(), Route::Login);
    assert!(app.app_state().login.error().is_none());
    assert!(screen(&mut app).contains("SUBMIT"));
}

#[test]
fn start_with_session_skips_login() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    assert_eq!(app.app_state().route(), Route::Dashboard);
    assert_eq!(app.app_state().user(), Some(&alice()));
}

#[test]
fn dashboard_shows_loading_before_listing_arrives() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    assert!(screen(&mut app).contains(dashboard::LOADING_TEXT));
}

#[test]
fn dashboard_renders_listing_once_loaded() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune", "Emma"]));
    app.start();
    assert!(app.wait_until_idle(WAIT));

    let text = screen(&mut app);
    assert!(text.contains("Dune"));
    assert!(text.contains("Emma"));
    assert!(text.contains("Signed in as Alice"));
    assert!(text.contains("Showing 1-2 of 2"));
    assert!(text.contains("Unknown"));
    assert!(text.contains("4.3"));
}

#[test]
fn failed_listing_shows_error_state() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::failing());
    app.start();
    assert!(app.wait_until_idle(WAIT));

    assert!(screen(&mut app).contains(dashboard::ERROR_TEXT));
}

#[test]
fn empty_listing_shows_empty_state() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&[]));
    app.start();
    assert!(app.wait_until_idle(WAIT));

    assert!(screen(&mut app).contains(dashboard::EMPTY_TEXT));
}

// ===== Login =====

#[test]
fn bad_credentials_show_error_and_stay_on_login() {
    let mut app = app_with(FakeAuth::signed_out(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    type_text(&mut app, "alice@example.com");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "wrong");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.app_state().route(), Route::Login);
    assert_eq!(
        app.app_state().login.error(),
        Some(crate::state::LOGIN_FAILED_MESSAGE)
    );
}

#[test]
fn good_credentials_open_dashboard() {
    let mut app = app_with(FakeAuth::signed_out(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    type_text(&mut app, "alice@example.com");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "secret");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.app_state().route(), Route::Dashboard);
    assert!(app.wait_until_idle(WAIT));
    assert!(screen(&mut app).contains("Dune"));
}

#[test]
fn letters_on_login_are_typed_not_bound() {
    let mut app = app_with(FakeAuth::signed_out(), FakeCatalog::with_titles(&[]));
    app.start();

    type_text(&mut app, "q?");

    assert_eq!(app.app_state().login.email().value(), "q?");
    assert!(!app.app_state().help_visible);
}

#[test]
fn esc_and_ctrl_c_quit_from_login() {
    let mut app = app_with(FakeAuth::signed_out(), FakeCatalog::with_titles(&[]));
    app.start();

    assert!(app.handle_key(key(KeyCode::Esc)));
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

// ===== Dashboard keys =====

#[test]
fn digit_sorts_and_repeat_reverses() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune", "Emma"]));
    app.start();
    assert!(app.wait_until_idle(WAIT));

    app.handle_key(key(KeyCode::Char('3')));
    let sort = app.app_state().dashboard.sort();
    assert_eq!(sort.field, Some(SortField::Title));
    assert_eq!(sort.direction, SortDirection::Ascending);

    app.handle_key(key(KeyCode::Char('3')));
    assert_eq!(
        app.app_state().dashboard.sort().direction,
        SortDirection::Descending
    );
    let first_row = app.app_state().dashboard.projection().unwrap().rows[0].title.clone();
    assert_eq!(first_row, "Emma");
}

#[test]
fn paging_keys_move_between_pages() {
    let titles: Vec<String> = (0..25).map(|i| format!("Book {i:02}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&titles));
    app.start();
    assert!(app.wait_until_idle(WAIT));

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.app_state().dashboard.page().index(), 2);

    app.handle_key(key(KeyCode::End));
    assert_eq!(app.app_state().dashboard.page().index(), 3);
    assert!(screen(&mut app).contains("Showing 21-25 of 25"));

    app.handle_key(key(KeyCode::Home));
    assert_eq!(app.app_state().dashboard.page().index(), 1);
}

#[test]
fn help_toggles_and_esc_closes() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&[]));
    app.start();

    app.handle_key(key(KeyCode::Char('?')));
    assert!(app.app_state().help_visible);
    assert!(screen(&mut app).contains("Keyboard Shortcuts"));

    assert!(!app.handle_key(key(KeyCode::Esc)));
    assert!(!app.app_state().help_visible);
}

#[test]
fn q_quits_from_dashboard() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&[]));
    app.start();

    assert!(app.handle_key(key(KeyCode::Char('q'))));
}

#[test]
fn logout_returns_to_login() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    app.handle_key(KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));

    assert_eq!(app.app_state().route(), Route::Login);
    assert!(app.app_state().user().is_none());
}

#[test]
fn failed_logout_stays_on_dashboard() {
    let auth = FakeAuth {
        fail_logout: true,
        ..FakeAuth::signed_in()
    };
    let mut app = app_with(auth, FakeCatalog::with_titles(&["Dune"]));
    app.start();

    app.handle_key(KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));

    assert_eq!(app.app_state().route(), Route::Dashboard);
    assert_eq!(
        app.app_state().status_message.as_deref(),
        Some("Logout failed")
    );
}

// ===== Export =====

#[test]
fn export_before_load_reports_nothing_to_export() {
    let mut app = app_with(FakeAuth::signed_in(), FakeCatalog::with_titles(&["Dune"]));
    app.start();

    app.handle_key(key(KeyCode::Char('e')));

    assert_eq!(
        app.app_state().status_message.as_deref(),
        Some("Nothing to export yet")
    );
}

#[test]
fn export_writes_visible_page() {
    let dir = scratch_dir("view-export");
    let mut app = app_exporting_to(
        FakeAuth::signed_in(),
        FakeCatalog::with_titles(&["Dune", "Emma"]),
        &dir,
    );
    app.start();
    assert!(app.wait_until_idle(WAIT));

    app.handle_key(key(KeyCode::Char('e')));

    let csv = std::fs::read_to_string(dir.join(crate::projection::EXPORT_FILE_NAME)).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Dune"));
    assert!(app
        .app_state()
        .status_message
        .as_deref()
        .unwrap()
        .starts_with("Exported 2 rows"));

    std::fs::remove_dir_all(dir).unwrap();
}
