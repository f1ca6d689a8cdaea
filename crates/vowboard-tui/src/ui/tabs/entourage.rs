//! Entourage tab.
//!
//! Draws the layout blocks top to bottom with a divider between them. In
//! two-column rows the left name is right-aligned and the right name
//! left-aligned so each pair meets at the center line.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vowboard_core::api::EntourageSource;
use vowboard_core::entourage::CategoryBlock;
use vowboard_core::models::EntourageMember;
use vowboard_core::utils::truncate_string;

use crate::app::App;
use crate::ui::styles;

/// Gap between the two columns of a row
const GUTTER: &str = "   ";

/// Longest divider drawn between blocks
const MAX_DIVIDER_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" The Entourage ")
        .title_style(styles::title_style())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let inner_width = area.width.saturating_sub(2) as usize;
    // The layout can shrink under the current offset after a refresh
    let top = app.entourage_scroll.min(max_scroll(app));
    let paragraph = Paragraph::new(content_lines(app, inner_width))
        .block(block)
        .scroll((top, 0));
    frame.render_widget(paragraph, area);
}

/// Furthest the tab can scroll: the last line at the top
pub fn max_scroll(app: &App) -> u16 {
    let count = content_lines(app, 0).len().saturating_sub(1);
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Banner, status message or layout; the line count doesn't depend on width
fn content_lines(app: &App, inner_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let EntourageSource::Fallback { ref reason } = app.entourage_source {
        lines.push(
            Line::from(vec![
                Span::styled(format!("Showing the saved list ({}) ", reason), styles::muted_style()),
                Span::styled("[r]", styles::help_key_style()),
                Span::styled(" try again", styles::muted_style()),
            ])
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(""));
    }

    if !app.entourage_loaded {
        lines.push(centered("Loading entourage...", styles::muted_style()));
    } else if app.layout.is_empty() {
        lines.push(centered("No entourage members yet", styles::muted_style()));
    } else {
        lines.extend(layout_lines(&app.layout, inner_width));
    }
    lines
}

/// Every line of the entourage for a given inner width
pub fn layout_lines(blocks: &[CategoryBlock], width: usize) -> Vec<Line<'static>> {
    let half = width.saturating_sub(GUTTER.len()) / 2;
    let mut lines = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
            lines.push(centered(&"─".repeat(width.min(MAX_DIVIDER_WIDTH)), styles::divider_style()));
            lines.push(Line::from(""));
        }

        match block {
            CategoryBlock::Label { title } => {
                lines.push(centered(title, styles::heading_style()));
            }
            CategoryBlock::Single { title, members } => {
                lines.push(centered(title, styles::heading_style()));
                for member in members {
                    lines.push(centered(&member.name, styles::name_style()));
                }
            }
            CategoryBlock::Pair { title, left, right } => {
                lines.push(centered(title, styles::heading_style()));
                lines.push(row(name_of(left), name_of(right), half, styles::name_style()));
            }
            CategoryBlock::Dual {
                title,
                left_title,
                right_title,
                rows,
            } => {
                if let Some(title) = title {
                    lines.push(centered(title, styles::heading_style()));
                }
                if left_title.is_some() || right_title.is_some() {
                    lines.push(row(
                        left_title.as_deref(),
                        right_title.as_deref(),
                        half,
                        styles::heading_style(),
                    ));
                }
                for r in rows {
                    lines.push(row(name_of(&r.left), name_of(&r.right), half, styles::name_style()));
                }
            }
        }
    }
    lines
}

fn name_of(member: &Option<EntourageMember>) -> Option<&str> {
    member.as_ref().map(|m| m.name.as_str())
}

fn centered(text: &str, style: Style) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), style)).alignment(Alignment::Center)
}

/// One two-column row: left cell right-aligned, right cell left-aligned
fn row(left: Option<&str>, right: Option<&str>, half: usize, style: Style) -> Line<'static> {
    let left = truncate_string(left.unwrap_or(""), half);
    let right = truncate_string(right.unwrap_or(""), half);
    Line::from(vec![
        Span::styled(format!("{:>width$}", left, width = half), style),
        Span::raw(GUTTER),
        Span::styled(format!("{:<width$}", right, width = half), style),
    ])
}
