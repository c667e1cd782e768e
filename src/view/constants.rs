//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the breadcrumb header in lines (border + content).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the table footer: summary line plus page links line.
pub const FOOTER_HEIGHT: u16 = 2;

/// Height of the status bar in lines.
///
/// Single line for transient messages and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the login card in columns.
pub const LOGIN_CARD_WIDTH: u16 = 56;

/// Height of the login card in lines.
///
/// Title, description, two labelled inputs, error line and submit hint.
pub const LOGIN_CARD_HEIGHT: u16 = 15;

/// Relative widths of the seven table columns, in table order.
pub const COLUMN_WIDTHS: [u16; 7] = [8, 18, 22, 8, 14, 14, 16];

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Most page links shown in the footer before eliding with `…`.
pub const MAX_PAGE_LINKS: usize = 9;
