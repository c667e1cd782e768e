//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the dashboard shortcuts grouped by
//! category. Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Sorting",
        &[
            ("1-7", "Sort by column (again to reverse)"),
        ],
    ),
    (
        "Pages",
        &[
            ("n/→", "Next page"),
            ("p/←", "Previous page"),
            ("g/Home", "First page"),
            ("G/End", "Last page"),
            ("z", "Records per page: 10 → 50 → 100"),
        ],
    ),
    (
        "Rows",
        &[("j/↓", "Next row"), ("k/↑", "Previous row")],
    ),
    (
        "Dashboard",
        &[
            ("e", "Export visible page to books.csv"),
            ("L", "Log out"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+C", "Quit")],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.title),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1.min(popup_area.height),
    };
    let hint = Paragraph::new(Span::styled(" Press Esc or ? to close ", palette.muted))
        .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate a rect centered in `area` with the given percentage size.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    centered_fixed(popup_width, popup_height, area)
}

/// Calculate a rect of fixed size centered in `area`, shrunk to fit.
pub(crate) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (category, keys)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, palette.title)));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<10}"), palette.key_hint),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render_help_overlay(frame, &Palette::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn help_overlay_lists_dashboard_shortcuts() {
        let text = rendered(100, 40);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Sorting"));
        assert!(text.contains("books.csv"));
        assert!(text.contains("Log out"));
    }

    #[test]
    fn help_overlay_fits_tiny_terminal() {
        // Must not panic when the popup is smaller than its content.
        let _ = rendered(10, 3);
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 80, area);
        assert_eq!(popup, Rect::new(20, 5, 60, 40));
    }

    #[test]
    fn centered_fixed_shrinks_to_area() {
        let area = Rect::new(2, 2, 20, 10);
        let rect = centered_fixed(56, 15, area);
        assert_eq!(rect, area);
    }
}
