//! Color palette for the dashboard.

use ratatui::style::{Color, Modifier, Style};

/// Brand accent used for titles and the active page link.
const ACCENT: Color = Color::Rgb(0xf1, 0x80, 0x70);

/// Muted brown used for the submit hint.
const BUTTON: Color = Color::Rgb(0x7c, 0x72, 0x6c);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Fixed color setting, ignoring the environment.
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles for every dashboard element.
///
/// With colors disabled only text modifiers (bold, reversed) remain, so the
/// selected row and active page stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Card and header titles.
    pub title: Style,
    /// Secondary text such as the pagination summary.
    pub muted: Style,
    /// Login errors and the listing error state.
    pub error: Style,
    /// Login field holding the cursor.
    pub focused_input: Style,
    /// Column header row.
    pub table_header: Style,
    /// Highlighted table row.
    pub selected_row: Style,
    /// Current page link in the footer.
    pub active_page: Style,
    /// Submit and action hints styled as buttons.
    pub button: Style,
    /// Key names in the status bar.
    pub key_hint: Style,
}

impl Palette {
    /// Palette for `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                title: bold.fg(ACCENT),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                focused_input: Style::default().fg(ACCENT),
                table_header: bold.fg(Color::White),
                selected_row: Style::default().add_modifier(Modifier::REVERSED),
                active_page: bold.fg(ACCENT).add_modifier(Modifier::UNDERLINED),
                button: bold.fg(Color::White).bg(BUTTON),
                key_hint: bold.fg(Color::Yellow),
            }
        } else {
            Self {
                title: bold,
                muted: Style::default(),
                error: bold,
                focused_input: bold,
                table_header: bold,
                selected_row: Style::default().add_modifier(Modifier::REVERSED),
                active_page: bold.add_modifier(Modifier::UNDERLINED),
                button: Style::default().add_modifier(Modifier::REVERSED),
                key_hint: bold,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
