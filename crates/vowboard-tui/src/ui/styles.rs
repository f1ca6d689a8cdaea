use ratatui::style::{Color, Modifier, Style};

// Color palette, warm tones to match the printed invitation
pub const PRIMARY: Color = Color::Rgb(155, 106, 65);
pub const SECONDARY: Color = Color::Rgb(120, 150, 110);
pub const ACCENT: Color = Color::Rgb(212, 175, 95);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(56, 44, 36);

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 28, 26)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Names in the entourage and on guest cards
pub fn name_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

/// Section headings in the entourage
pub fn heading_style() -> Style {
    Style::default()
        .fg(PRIMARY)
        .add_modifier(Modifier::BOLD | Modifier::ITALIC)
}

pub fn divider_style() -> Style {
    Style::default().fg(Color::Rgb(90, 70, 55))
}

/// Guest cards fade out while the carousel turns the page
pub fn transition_style() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::DIM)
}
