//! Book-list screen: breadcrumb header, table, footer and status bar.

use super::constants::{
    COLUMN_WIDTHS, FOOTER_HEIGHT, HEADER_HEIGHT, MAX_PAGE_LINKS, STATUS_BAR_HEIGHT,
};
use super::styles::Palette;
use crate::model::SortField;
use crate::projection::{Pagination, Projection};
use crate::state::{AppState, ListingStatus};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Shown until the listing arrives.
pub const LOADING_TEXT: &str = "Loading...";
/// Shown when the listing fetch failed.
pub const ERROR_TEXT: &str = "Error fetching data";
/// Shown when no entry survives the filter.
pub const EMPTY_TEXT: &str = "No data available";

/// Render the whole dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header, state, palette);

    let dashboard = &state.dashboard;
    match dashboard.listing() {
        ListingStatus::Loading => render_message(frame, body, LOADING_TEXT, palette),
        ListingStatus::Failed(_) => render_message(frame, body, ERROR_TEXT, palette),
        ListingStatus::Loaded(log) if log.is_empty() => {
            render_message(frame, body, EMPTY_TEXT, palette)
        }
        ListingStatus::Loaded(_) => {
            if let Some(projection) = dashboard.projection() {
                render_book_list(frame, body, state, &projection, palette);
            }
        }
    }

    render_status_bar(frame, status, state, palette);
}

/// Breadcrumb on the left, signed-in user on the right.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let breadcrumb = Line::from(vec![
        Span::styled("Books", palette.title),
        Span::styled(" › ", palette.muted),
        Span::raw("Books List"),
    ]);
    frame.render_widget(Paragraph::new(breadcrumb), inner);

    if let Some(user) = state.user() {
        let signed_in = Line::from(vec![
            Span::styled("Signed in as ", palette.muted),
            Span::raw(user.display_name().to_string()),
            Span::styled("  [L] Logout", palette.key_hint),
        ]);
        frame.render_widget(Paragraph::new(signed_in).alignment(Alignment::Right), inner);
    }
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Books List ", palette.title));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_book_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    projection: &Projection,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Books List ", palette.title))
        .title_bottom(Span::styled(" Manage your Book Record ", palette.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(inner);

    let sort = state.dashboard.sort();
    let header = Row::new(SortField::ALL.iter().map(|&field| {
        let label = match sort.arrow_for(field) {
            Some(arrow) => format!("{} {}", field.label(), arrow),
            None => field.label().to_string(),
        };
        Cell::from(label)
    }))
    .style(palette.table_header);

    let rows = projection
        .rows
        .iter()
        .map(|row| Row::new(row.fields().map(|field| Cell::from(field.to_string()))));

    let table = Table::new(rows, COLUMN_WIDTHS.map(Constraint::Fill))
        .header(header)
        .column_spacing(1)
        .row_highlight_style(palette.selected_row);

    let mut table_state = TableState::default();
    if !projection.rows.is_empty() {
        table_state.select(Some(state.dashboard.selected_row().min(projection.rows.len() - 1)));
    }
    frame.render_stateful_widget(table, table_area, &mut table_state);

    render_footer(frame, footer_area, &projection.pagination, state, palette);
}

/// Summary and records-per-page on the first line, page links on the second.
fn render_footer(
    frame: &mut Frame,
    area: Rect,
    pagination: &Pagination,
    state: &AppState,
    palette: &Palette,
) {
    let [summary_area, links_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(pagination.summary(), palette.muted)),
        summary_area,
    );
    frame.render_widget(
        Paragraph::new(format!("Records per page: {}", state.dashboard.page().size()))
            .alignment(Alignment::Right),
        summary_area,
    );

    frame.render_widget(
        Paragraph::new(page_links(pagination, palette)).alignment(Alignment::Center),
        links_area,
    );
}

/// `‹ Prev  1 2 3  Next ›` with the current page highlighted.
fn page_links(pagination: &Pagination, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled("‹ Prev ", palette.muted)];
    for page in visible_pages(pagination.page_count, pagination.page_index) {
        spans.push(Span::raw(" "));
        match page {
            Some(n) if n == pagination.page_index => {
                spans.push(Span::styled(n.to_string(), palette.active_page))
            }
            Some(n) => spans.push(Span::raw(n.to_string())),
            None => spans.push(Span::styled("…", palette.muted)),
        }
    }
    spans.push(Span::styled("  Next ›", palette.muted));
    Line::from(spans)
}

/// Page numbers to show; `None` marks an elided run.
///
/// Short lists are shown whole. Long lists keep the first and last page and a
/// window around `current`.
pub fn visible_pages(page_count: usize, current: usize) -> Vec<Option<usize>> {
    if page_count <= MAX_PAGE_LINKS {
        return (1..=page_count).map(Some).collect();
    }

    let window = (MAX_PAGE_LINKS - 4) / 2;
    let current = current.clamp(1, page_count);
    let start = current.saturating_sub(window).max(2);
    let end = (current + window).min(page_count - 1);

    let mut pages = vec![Some(1)];
    if start > 2 {
        pages.push(None);
    }
    pages.extend((start..=end).map(Some));
    if end < page_count - 1 {
        pages.push(None);
    }
    pages.push(Some(page_count));
    pages
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let line = match &state.status_message {
        Some(message) => Line::from(Span::raw(message.clone())),
        None => Line::from(Span::styled(
            "1-7: sort | n/p: page | z: per page | e: export | ?: help | q: quit",
            palette.muted,
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
