//! Vowboard - a terminal board for a wedding site.
//!
//! Shows the live guest book as a paging carousel, the entourage laid out
//! the way the site prints it, and the background gallery.

mod app;
mod carousel;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vowboard_core::api::{ApiClient, EntourageSource};
use vowboard_core::config::Config;
use vowboard_core::entourage::build_layout;
use vowboard_core::gallery;
use vowboard_core::guests::GuestSummary;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written inside the cache directory while the board is up
const LOG_FILE: &str = "vowboard.log";

fn env_filter() -> EnvFilter {
    // RUST_LOG controls the level (e.g. RUST_LOG=vowboard_core=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for the one-shot dump commands
fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file so output doesn't tear the alternate screen.
/// The returned guard flushes the writer when dropped.
fn init_file_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if let Some(command) = args.get(1).map(String::as_str) {
        match command {
            "--dump-layout" | "--dump-guests" | "--dump-gallery" => {
                init_stderr_tracing();
                let config = load_config();
                return match command {
                    "--dump-layout" => dump_layout(&config).await,
                    "--dump-guests" => dump_guests(&config).await,
                    _ => dump_gallery(&config),
                };
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: vowboard [--dump-layout | --dump-guests | --dump-gallery]");
                std::process::exit(2);
            }
        }
    }

    let config = Config::load()?;
    let log_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
    let _log_guard = init_file_tracing(&log_dir)?;
    info!("Vowboard starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app, show cached data, then fetch fresh
    let result = match App::new(config) {
        Ok(mut app) => {
            app.load_from_cache();
            app.refresh_all(Instant::now());
            run_app(&mut terminal, &mut app).await
        }
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
    }

    info!("Vowboard shutting down");
    Ok(())
}

/// Print the entourage layout as JSON, the blocks exactly as the board draws them
async fn dump_layout(config: &Config) -> Result<()> {
    let api = ApiClient::new(config.api_url())?;
    eprintln!("Fetching entourage from {}...", api.base_url());

    let ((members, member_source), (sponsors, sponsor_source)) =
        futures::join!(api.fetch_entourage(), api.fetch_sponsors());
    if let EntourageSource::Fallback { reason } = &member_source {
        eprintln!("Using bundled entourage: {}", reason);
    }
    if let EntourageSource::Fallback { reason } = &sponsor_source {
        eprintln!("Using bundled sponsors: {}", reason);
    }

    let layout = build_layout(&members, &sponsors);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    let shown: usize = layout.iter().map(|block| block.members().len()).sum();
    eprintln!(
        "Done! {} blocks showing {} of {} members.",
        layout.len(),
        shown,
        members.len()
    );
    Ok(())
}

/// Print the confirmed guest summary as JSON
async fn dump_guests(config: &Config) -> Result<()> {
    let api = ApiClient::new(config.api_url())?;
    eprintln!("Fetching guests from {}...", api.base_url());

    let records = api.fetch_guests().await?;
    let fetched = records.len();
    let summary = GuestSummary::from_records(records);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    eprintln!(
        "Done! {} of {} RSVPs confirmed, {} guests.",
        summary.rsvp_count, fetched, summary.total_guests
    );
    Ok(())
}

/// Print the gallery listing as JSON
fn dump_gallery(config: &Config) -> Result<()> {
    let images = gallery::list_images(&config.public_dir, config.gallery_sort);
    println!("{}", serde_json::to_string_pretty(&images)?);
    eprintln!(
        "Done! {} images under {} ({} order).",
        images.len(),
        config.public_dir.display(),
        config.gallery_sort
    );
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so timers and background fetches keep moving
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        app.tick(now);
        app.check_background_tasks(now);

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
