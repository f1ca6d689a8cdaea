use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use vowboard_core::utils::format_clock;

use crate::app::{App, AppState, Tab};

use super::styles;
use super::tabs::{entourage, gallery, guests};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Vowboard";
    let subtitle = format!("  {}", app.api.base_url());
    let help_hint = "[?] Help";
    let used = title.chars().count() + subtitle.chars().count() + help_hint.len() + 2;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(subtitle, styles::muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("[1] Guests", Tab::Guests),
        ("[2] Entourage", Tab::Entourage),
        ("[3] Gallery", Tab::Gallery),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, tab)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::tab_style(app.current_tab == *tab)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Guests => guests::render(frame, app, area),
        Tab::Entourage => entourage::render(frame, app, area),
        Tab::Gallery => gallery::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]efresh | [q]uit";

    let (left_text, left_style) = match app.status_message {
        Some(ref msg) if msg.starts_with("Error:") || msg.contains("error") => {
            (format!(" {} ", msg), styles::error_style())
        }
        Some(ref msg) => (format!(" {} ", msg), styles::muted_style()),
        None => (format!(" {} ", idle_status(app)), styles::muted_style()),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

/// Status text when there is no message to show
pub fn idle_status(app: &App) -> String {
    let mut text = match app.current_tab {
        Tab::Entourage => format!("Entourage saved {}", app.cache_ages.entourage_age()),
        Tab::Guests | Tab::Gallery => {
            let updated = app
                .last_guest_update
                .as_ref()
                .map(format_clock)
                .unwrap_or_else(|| "never".to_string());
            format!("Last updated {}", updated)
        }
    };
    if app.cache_ages.any_stale {
        text.push_str(" (stale)");
    }
    if app.rsvp_refresh_pending() || app.entourage_refresh_pending() {
        text.push_str(" - refresh queued");
    }
    text
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(50, 22, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Vowboard", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-3", "Switch tabs"),
        help_line("←/→", "Prev/next tab"),
        help_line("↑/↓", "Scroll entourage / select image"),
        help_line("[ / ]", "Prev/next guest page"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("r", "Refresh current tab (try again)"),
        help_line("s", "Simulate an RSVP submission"),
        help_line("e", "Simulate an entourage edit"),
        help_line("g", "Toggle gallery sort"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
