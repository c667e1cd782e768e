//! Domain-level keyboard actions independent of key bindings.

use super::sort::SortField;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row cursor
    /// Move the row cursor up within the visible page. Default: k/↑
    SelectPrevRow,
    /// Move the row cursor down within the visible page. Default: j/↓
    SelectNextRow,

    // Pagination
    /// Default: n/→/Page Down
    NextPage,
    /// Default: p/←/Page Up
    PrevPage,
    /// Default: g/Home
    FirstPage,
    /// Default: G/End
    LastPage,
    /// Cycle records per page 10 → 50 → 100. Default: z
    CyclePageSize,

    // Sorting
    /// Sort by column (toggles direction when already sorted). Default: 1-7
    SortBy(SortField),

    // Dashboard
    /// Write the visible page to books.csv. Default: e
    Export,
    /// End the session and return to login. Default: L
    Logout,

    // Application
    /// Toggle help overlay. Default: ?
    Help,
    /// Quit. Default: q
    Quit,
}
