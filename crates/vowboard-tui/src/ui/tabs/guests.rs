//! Guest book tab: totals, the current carousel page of guest cards, and
//! page indicator dots.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use vowboard_core::models::GuestRecord;
use vowboard_core::utils::{pluralize, truncate_string};

use crate::app::App;
use crate::ui::styles;

/// Longest guest message shown on a card
const MAX_MESSAGE_CHARS: usize = 120;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Totals
            Constraint::Min(6),    // Cards
            Constraint::Length(1), // Page dots
        ])
        .split(area);

    render_totals(frame, app, chunks[0]);

    if !app.guests_loaded {
        let message = if app.guests_unavailable {
            "Guest list unavailable. Press r to try again"
        } else {
            "Loading guests..."
        };
        render_message(frame, chunks[1], message);
        return;
    }
    if app.guests.is_empty() {
        render_message(frame, chunks[1], "No confirmed guests yet");
        return;
    }

    render_cards(frame, app, chunks[1]);
    render_page_dots(frame, app, chunks[2]);
}

fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let mut total = vec![
        Span::styled(app.guests.total_guests.to_string(), styles::title_style()),
        Span::raw(" guests attending"),
    ];
    if let Some(marker) = app.increase_marker() {
        total.push(Span::raw("  "));
        total.push(Span::styled(marker, styles::success_style()));
    }

    let lines = vec![
        Line::from(total).alignment(Alignment::Center),
        Line::from(Span::styled(
            pluralize(app.guests.rsvp_count, "RSVP entry", "RSVP entries"),
            styles::muted_style(),
        ))
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title(" Book of Guests ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), styles::muted_style())))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::border_style(false)));
    frame.render_widget(paragraph, area);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let page_size = app.carousel.page_size();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, page_size as u32); page_size])
        .split(area);

    if !app.carousel.is_visible() {
        for column in columns.iter() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(styles::transition_style());
            frame.render_widget(block, *column);
        }
        return;
    }

    for (guest, column) in app.visible_guests().iter().zip(columns.iter()) {
        render_card(frame, guest, *column);
    }
}

fn render_card(frame: &mut Frame, guest: &GuestRecord, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", guest.initials()))
        .title_style(styles::highlight_style())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(styles::border_style(guest.is_vip));

    let paragraph = Paragraph::new(card_lines(guest))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Text of one guest card, top to bottom
pub fn card_lines(guest: &GuestRecord) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(guest.name.clone(), styles::name_style()))];

    if guest.is_vip {
        lines.push(Line::from(Span::styled("★ VIP", styles::highlight_style())));
    }
    if !guest.role.trim().is_empty() {
        lines.push(Line::from(Span::styled(guest.role.clone(), styles::muted_style())));
    }

    lines.push(Line::from(""));
    let mut party = guest.party_label();
    if let Some(table) = guest.table_label() {
        party = format!("{} · {}", party, table);
    }
    lines.push(Line::from(Span::styled(party, styles::list_item_style())));

    for companion in guest.companions.iter().filter(|c| !c.name.trim().is_empty()) {
        let text = if companion.relationship.trim().is_empty() {
            format!("+ {}", companion.name)
        } else {
            format!("+ {} ({})", companion.name, companion.relationship)
        };
        lines.push(Line::from(Span::styled(text, styles::muted_style())));
    }

    if let Some(message) = guest.message.as_deref().filter(|m| !m.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", truncate_string(message.trim(), MAX_MESSAGE_CHARS)),
            styles::list_item_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Confirmed {}", guest.confirmed_on()),
        styles::muted_style(),
    )));
    lines
}

fn render_page_dots(frame: &mut Frame, app: &App, area: Rect) {
    if !app.guests.needs_paging(app.carousel.page_size()) {
        return;
    }
    let pages = app.carousel.page_count(app.guests.guests.len());
    let current = app.carousel.current_page();
    let spans: Vec<Span> = (0..pages)
        .map(|i| {
            if i == current {
                Span::styled("● ", styles::highlight_style())
            } else {
                Span::styled("○ ", styles::muted_style())
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_card_lines() {
        let guest: GuestRecord = serde_json::from_value(serde_json::json!({
            "name": "Maria Santos",
            "role": "Friend of the Bride",
            "allowedGuests": 2,
            "tableNumber": "5",
            "isVip": true,
            "status": "confirmed",
            "companions": [{"name": "Jose Santos", "relationship": "Husband"}],
            "message": "Congratulations!",
            "updatedAt": "2026-01-05T10:00:00Z"
        }))
        .unwrap();

        let lines = text(&card_lines(&guest));
        assert_eq!(lines[0], "Maria Santos");
        assert!(lines.contains(&"★ VIP".to_string()));
        assert!(lines.contains(&"2 Guests · Table 5".to_string()));
        assert!(lines.contains(&"+ Jose Santos (Husband)".to_string()));
        assert!(lines.contains(&"\"Congratulations!\"".to_string()));
        assert_eq!(lines.last().unwrap(), "Confirmed Jan 05, 2026");
    }

    #[test]
    fn test_card_lines_minimal() {
        let guest: GuestRecord =
            serde_json::from_value(serde_json::json!({"name": "Ben", "status": "confirmed"})).unwrap();
        let lines = text(&card_lines(&guest));
        assert_eq!(lines, vec!["Ben", "", "1 Guest", "", "Confirmed Recently"]);
    }
}
