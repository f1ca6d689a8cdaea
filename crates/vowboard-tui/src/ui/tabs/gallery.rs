use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use vowboard_core::gallery::{GalleryImage, ImageCategory};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_image_list(frame, app, chunks[0]);
    render_image_detail(frame, app, chunks[1]);
}

fn category_label(category: ImageCategory) -> &'static str {
    match category {
        ImageCategory::Mobile => "mobile",
        ImageCategory::Desktop => "desktop",
    }
}

fn render_image_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(
            " Gallery ({}) · sorted by {} ",
            app.gallery.len(),
            app.gallery_sort
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if app.gallery.is_empty() {
        let message = format!("No images found in {}", app.config.public_dir.display());
        let paragraph = Paragraph::new(Line::from(Span::styled(message, styles::muted_style())))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .gallery
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let style = if i == app.gallery_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<8}", category_label(image.category)), styles::muted_style()),
                Span::raw(image.file_name().to_string()),
            ]))
            .style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.gallery_selection));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn render_image_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Image ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let lines = match app.gallery.get(app.gallery_selection) {
        Some(image) => detail_lines(image, &app.gallery),
        None => vec![Line::from(Span::styled(
            "Add photos to mobile-background/ or desktop-background/",
            styles::muted_style(),
        ))],
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_lines(image: &GalleryImage, all: &[GalleryImage]) -> Vec<Line<'static>> {
    let in_category = all.iter().filter(|i| i.category == image.category).count();
    vec![
        Line::from(vec![
            Span::styled("File:     ", styles::highlight_style()),
            Span::raw(image.file_name().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Path:     ", styles::highlight_style()),
            Span::raw(image.src.clone()),
        ]),
        Line::from(vec![
            Span::styled("Set:      ", styles::highlight_style()),
            Span::raw(format!("{} ({} images)", category_label(image.category), in_category)),
        ]),
    ]
}
