//! Keyboard input handling for the TUI.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use vowboard_core::events::SiteEvent;

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};
use crate::ui::tabs::entourage;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let now = Instant::now();

    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('1') => app.current_tab = Tab::Guests,
        KeyCode::Char('2') => app.current_tab = Tab::Entourage,
        KeyCode::Char('3') => app.current_tab = Tab::Gallery,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right | KeyCode::Tab => app.current_tab = app.current_tab.next(),
        KeyCode::Char('r') => app.refresh_current_tab(now),
        KeyCode::Char('s') => {
            debug!("Simulating RSVP submission");
            app.publish(SiteEvent::RsvpUpdated);
            app.status_message = Some("RSVP received, refreshing guests shortly...".to_string());
        }
        KeyCode::Char('e') => {
            debug!("Simulating entourage edit");
            app.publish(SiteEvent::EntourageUpdated);
            app.status_message = Some("Entourage updated, refreshing shortly...".to_string());
        }
        KeyCode::Char('g') if app.current_tab == Tab::Gallery => app.toggle_gallery_sort(),
        KeyCode::Char(']') if app.current_tab == Tab::Guests => {
            let total = app.guests.guests.len();
            app.carousel.next_page(total, now);
        }
        KeyCode::Char('[') if app.current_tab == Tab::Guests => {
            let total = app.guests.guests.len();
            app.carousel.prev_page(total, now);
        }
        _ => handle_scroll(app, key.code),
    }

    Ok(false)
}

fn handle_scroll(app: &mut App, code: KeyCode) {
    match (app.current_tab, code) {
        (Tab::Entourage, KeyCode::Down | KeyCode::Char('j')) => {
            app.entourage_scroll = app.entourage_scroll.saturating_add(1).min(entourage::max_scroll(app));
        }
        (Tab::Entourage, KeyCode::Up | KeyCode::Char('k')) => {
            app.entourage_scroll = app.entourage_scroll.saturating_sub(1);
        }
        (Tab::Entourage, KeyCode::PageDown) => {
            app.entourage_scroll = app
                .entourage_scroll
                .saturating_add(PAGE_SCROLL_SIZE)
                .min(entourage::max_scroll(app));
        }
        (Tab::Entourage, KeyCode::PageUp) => {
            app.entourage_scroll = app.entourage_scroll.saturating_sub(PAGE_SCROLL_SIZE);
        }
        (Tab::Entourage, KeyCode::Home) => app.entourage_scroll = 0,
        (Tab::Gallery, KeyCode::Down | KeyCode::Char('j')) => app.select_next_image(),
        (Tab::Gallery, KeyCode::Up | KeyCode::Char('k')) => app.select_prev_image(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;
    use vowboard_core::cache::CacheManager;
    use vowboard_core::api::EntourageSource;
    use vowboard_core::config::Config;
    use vowboard_core::models::EntourageMember;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(dir: &TempDir) -> App {
        let mut config = Config::default();
        config.api_base_url = "http://127.0.0.1:9".to_string();
        config.public_dir = dir.path().join("public");
        let cache = CacheManager::new(dir.path().join("cache")).unwrap();
        App::with_cache(config, cache, Instant::now()).unwrap()
    }

    #[test]
    fn test_tab_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        handle_input(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.current_tab, Tab::Gallery);
        handle_input(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.current_tab, Tab::Guests);
        handle_input(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.current_tab, Tab::Gallery);
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).unwrap());
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_help_swallows_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        handle_input(&mut app, key(KeyCode::Char('?'))).unwrap();
        handle_input(&mut app, key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.current_tab, Tab::Guests);
        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_simulated_rsvp_schedules_refresh() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        handle_input(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(!app.rsvp_refresh_pending());
        app.tick(Instant::now());
        assert!(app.rsvp_refresh_pending());
    }

    fn ushers(count: usize) -> Vec<EntourageMember> {
        (0..count)
            .map(|i| EntourageMember::new(&format!("Usher {}", i), "Usher", "Ushers"))
            .collect()
    }

    #[test]
    fn test_entourage_scroll() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.set_entourage(ushers(40), vec![], EntourageSource::Live);
        app.current_tab = Tab::Entourage;
        handle_input(&mut app, key(KeyCode::PageDown)).unwrap();
        handle_input(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.entourage_scroll, PAGE_SCROLL_SIZE - 1);
        handle_input(&mut app, key(KeyCode::Home)).unwrap();
        assert_eq!(app.entourage_scroll, 0);
    }

    #[test]
    fn test_entourage_scroll_stops_at_last_line() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        // Heading plus two columns of three rows
        app.set_entourage(ushers(6), vec![], EntourageSource::Live);
        app.current_tab = Tab::Entourage;
        assert_eq!(entourage::max_scroll(&app), 3);

        for _ in 0..5 {
            handle_input(&mut app, key(KeyCode::PageDown)).unwrap();
        }
        assert_eq!(app.entourage_scroll, 3);
        handle_input(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.entourage_scroll, 3);

        app.set_entourage(vec![], vec![], EntourageSource::Live);
        assert_eq!(entourage::max_scroll(&app), 0);
    }
}
