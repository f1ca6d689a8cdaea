//! Application state management for the Vowboard terminal board.
//!
//! `App` owns everything the display needs: the latest guest summary and
//! entourage layout, the carousel, the poll and debounce timers, and the
//! channel background fetches report through. Nothing here blocks; the
//! main loop calls `tick` and `check_background_tasks` every frame.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use vowboard_core::api::{ApiClient, ApiError, EntourageSource};
use vowboard_core::cache::{CacheAges, CacheManager};
use vowboard_core::config::Config;
use vowboard_core::entourage::{build_layout, CategoryBlock};
use vowboard_core::events::{self, EventBus, SiteEvent};
use vowboard_core::gallery::{self, GalleryImage, GallerySort};
use vowboard_core::guests::GuestSummary;
use vowboard_core::models::{EntourageMember, GuestRecord, PrincipalSponsor};
use vowboard_core::schedule::{Debounce, Interval};

use crate::carousel::Carousel;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel
const CHANNEL_BUFFER_SIZE: usize = 16;

/// How long the "+N" marker stays up after the guest total rises
const INCREASE_MARKER_DURATION: Duration = Duration::from_secs(2);

/// Lines scrolled per PageUp/PageDown on the entourage tab
pub const PAGE_SCROLL_SIZE: u16 = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Guests,
    Entourage,
    Gallery,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Guests => "Guests",
            Tab::Entourage => "Entourage",
            Tab::Gallery => "Gallery",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Guests => Tab::Entourage,
            Tab::Entourage => Tab::Gallery,
            Tab::Gallery => Tab::Guests,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Guests => Tab::Gallery,
            Tab::Entourage => Tab::Guests,
            Tab::Gallery => Tab::Entourage,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// "+N" shown next to the guest total after it rises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increase {
    pub delta: u32,
    until: Instant,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned fetch tasks back to the main loop.
enum RefreshResult {
    /// Guest list fetched and summarized
    Guests(GuestSummary),
    /// Entourage and sponsors, live or bundled
    Entourage {
        members: Vec<EntourageMember>,
        sponsors: Vec<PrincipalSponsor>,
        source: EntourageSource,
    },
    /// A guest fetch failed; previous data stays on screen
    Error { message: String, transient: bool },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub cache: CacheManager,
    pub events: EventBus,
    event_rx: broadcast::Receiver<SiteEvent>,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,

    // Guest book
    pub guests: GuestSummary,
    pub guests_loaded: bool,
    /// The first fetch failed and there was nothing cached to show
    pub guests_unavailable: bool,
    pub last_guest_update: Option<DateTime<Utc>>,
    pub carousel: Carousel,
    increase: Option<Increase>,

    // Entourage
    pub entourage: Vec<EntourageMember>,
    pub sponsors: Vec<PrincipalSponsor>,
    pub layout: Vec<CategoryBlock>,
    pub entourage_source: EntourageSource,
    pub entourage_loaded: bool,
    pub entourage_scroll: u16,

    // Gallery
    pub gallery: Vec<GalleryImage>,
    pub gallery_sort: GallerySort,
    pub gallery_selection: usize,

    // Timers
    guest_poll: Interval,
    rsvp_refresh: Debounce,
    entourage_refresh: Debounce,

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    pub status_message: Option<String>,
    pub cache_ages: CacheAges,
}

impl App {
    /// Create the app with the standard cache location
    pub fn new(config: Config) -> Result<Self> {
        let cache_dir = config.cache_dir().unwrap_or_else(|e| {
            warn!(error = %e, "No cache directory, using ./cache");
            PathBuf::from("./cache")
        });
        debug!(?cache_dir, "Cache directory configured");
        let cache = CacheManager::new(cache_dir)?;
        Self::with_cache(config, cache, Instant::now())
    }

    pub fn with_cache(config: Config, cache: CacheManager, now: Instant) -> Result<Self> {
        let api = ApiClient::new(config.api_url())?;
        let events = EventBus::new();
        let event_rx = events.subscribe();
        let (refresh_tx, refresh_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let carousel = Carousel::new(
            config.page_size,
            config.carousel_interval(),
            config.transition(),
            now,
        );
        let guest_poll = Interval::new(config.poll_interval(), now);
        let rsvp_refresh = Debounce::new(config.rsvp_refresh_delay());
        let entourage_refresh = Debounce::new(config.entourage_refresh_delay());
        let gallery_sort = config.gallery_sort;

        info!(api = %api.base_url(), "App created");

        Ok(Self {
            config,
            api,
            cache,
            events,
            event_rx,
            state: AppState::Normal,
            current_tab: Tab::Guests,
            guests: GuestSummary::default(),
            guests_loaded: false,
            guests_unavailable: false,
            last_guest_update: None,
            carousel,
            increase: None,
            entourage: Vec::new(),
            sponsors: Vec::new(),
            layout: Vec::new(),
            entourage_source: EntourageSource::Live,
            entourage_loaded: false,
            entourage_scroll: 0,
            gallery: Vec::new(),
            gallery_sort,
            gallery_selection: 0,
            guest_poll,
            rsvp_refresh,
            entourage_refresh,
            refresh_rx,
            refresh_tx,
            status_message: None,
            cache_ages: CacheAges::default(),
        })
    }

    /// Show the last good snapshots until the first fetch lands
    pub fn load_from_cache(&mut self) {
        match self.cache.load_guests() {
            Ok(Some(cached)) => {
                debug!(age = %cached.age_display(), "Showing cached guests");
                self.guests = cached.data;
                self.last_guest_update = Some(cached.cached_at);
                self.guests_loaded = true;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load cached guests"),
        }

        let members = self.cache.load_entourage().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load cached entourage");
            None
        });
        let sponsors = self.cache.load_sponsors().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load cached sponsors");
            None
        });
        if let Some(members) = members {
            self.set_entourage(
                members.data,
                sponsors.map(|s| s.data).unwrap_or_default(),
                EntourageSource::Live,
            );
        }

        self.cache_ages = self.cache.get_cache_ages();
        self.rescan_gallery();
    }

    // ===== Background fetches =====

    /// Helper to send refresh results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send refresh result - channel closed");
        }
    }

    pub fn refresh_guests(&self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            match api.fetch_guests().await {
                Ok(records) => {
                    let summary = GuestSummary::from_records(records);
                    Self::send_result(&tx, RefreshResult::Guests(summary)).await;
                }
                Err(e) => {
                    warn!(error = %e, "Guest fetch failed, keeping previous list");
                    let transient = e.downcast_ref::<ApiError>().is_some_and(|api| api.is_transient());
                    let message = format!("Guests: {:#}", e);
                    Self::send_result(&tx, RefreshResult::Error { message, transient }).await;
                }
            }
        });
    }

    pub fn refresh_entourage(&self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            let ((members, member_source), (sponsors, sponsor_source)) =
                futures::join!(api.fetch_entourage(), api.fetch_sponsors());
            // The banner only needs to know whether the member list is real
            let source = if member_source.is_fallback() {
                member_source
            } else {
                debug!(sponsors_fallback = sponsor_source.is_fallback(), "Entourage fetched");
                EntourageSource::Live
            };
            Self::send_result(
                &tx,
                RefreshResult::Entourage {
                    members,
                    sponsors,
                    source,
                },
            )
            .await;
        });
    }

    pub fn refresh_all(&mut self, now: Instant) {
        self.refresh_guests();
        self.refresh_entourage();
        self.rescan_gallery();
        self.guest_poll.reset(now);
    }

    /// Manual refresh ("try again") of whatever the current tab shows
    pub fn refresh_current_tab(&mut self, now: Instant) {
        self.status_message = Some(format!("Refreshing {}...", self.current_tab.title().to_lowercase()));
        match self.current_tab {
            Tab::Guests => {
                self.refresh_guests();
                self.guest_poll.reset(now);
            }
            Tab::Entourage => self.refresh_entourage(),
            Tab::Gallery => {
                self.rescan_gallery();
                self.status_message = None;
            }
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self, now: Instant) {
        let mut results = Vec::new();
        while let Ok(result) = self.refresh_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_refresh_result(result, now);
        }
    }

    fn process_refresh_result(&mut self, result: RefreshResult, now: Instant) {
        match result {
            RefreshResult::Guests(summary) => {
                if let Err(e) = self.cache.save_guests(&summary) {
                    warn!(error = %e, "Failed to cache guests");
                }
                self.apply_guest_summary(summary, now);
                self.clear_progress_message();
            }
            RefreshResult::Entourage {
                members,
                sponsors,
                source,
            } => {
                if !source.is_fallback() {
                    if let Err(e) = self.cache.save_entourage(&members) {
                        warn!(error = %e, "Failed to cache entourage");
                    }
                    if let Err(e) = self.cache.save_sponsors(&sponsors) {
                        warn!(error = %e, "Failed to cache sponsors");
                    }
                }
                self.set_entourage(members, sponsors, source);
                self.clear_progress_message();
            }
            RefreshResult::Error { message, transient } => {
                let user_message = if transient {
                    "Guest list unreachable, will retry. Showing the last one.".to_string()
                } else {
                    format!("Error: {}", message)
                };
                self.status_message = Some(user_message);
                if !self.guests_loaded {
                    self.guests_unavailable = true;
                }
            }
        }
        self.cache_ages = self.cache.get_cache_ages();
    }

    /// Only clear progress messages, errors stay until the next one
    fn clear_progress_message(&mut self) {
        if let Some(ref msg) = self.status_message {
            if !msg.starts_with("Error:") {
                self.status_message = None;
            }
        }
    }

    // ===== State updates =====

    /// Swap in a fresh guest summary, raising the "+N" marker when the
    /// total went up from a non-zero value.
    pub fn apply_guest_summary(&mut self, summary: GuestSummary, now: Instant) {
        let previous = self.guests.total_guests;
        if previous > 0 && summary.total_guests > previous {
            let delta = summary.total_guests - previous;
            info!(previous, current = summary.total_guests, "Guest total increased");
            self.increase = Some(Increase {
                delta,
                until: now + INCREASE_MARKER_DURATION,
            });
        }
        self.guests = summary;
        self.guests_loaded = true;
        self.guests_unavailable = false;
        self.last_guest_update = Some(Utc::now());
        self.carousel.clamp(self.guests.guests.len());
    }

    pub fn set_entourage(
        &mut self,
        members: Vec<EntourageMember>,
        sponsors: Vec<PrincipalSponsor>,
        source: EntourageSource,
    ) {
        self.layout = build_layout(&members, &sponsors);
        let headings: Vec<String> = self.layout.iter().map(CategoryBlock::heading).collect();
        debug!(?headings, fallback = source.is_fallback(), "Entourage layout updated");
        self.entourage = members;
        self.sponsors = sponsors;
        self.entourage_source = source;
        self.entourage_loaded = true;
    }

    pub fn rescan_gallery(&mut self) {
        self.gallery = gallery::list_images(&self.config.public_dir, self.gallery_sort);
        if self.gallery_selection >= self.gallery.len() {
            self.gallery_selection = self.gallery.len().saturating_sub(1);
        }
    }

    pub fn toggle_gallery_sort(&mut self) {
        self.gallery_sort = self.gallery_sort.toggle();
        self.config.gallery_sort = self.gallery_sort;
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save gallery sort preference");
        }
        self.rescan_gallery();
    }

    /// Announce a site event, as the RSVP form or the sheet editor would
    pub fn publish(&self, event: SiteEvent) {
        self.events.publish(event);
    }

    // ===== Timers =====

    /// Drive every timer: site events, debounced refreshes, the guest poll
    /// and the carousel.
    pub fn tick(&mut self, now: Instant) {
        for event in events::drain(&mut self.event_rx) {
            match event {
                SiteEvent::RsvpUpdated => self.rsvp_refresh.trigger(now),
                SiteEvent::EntourageUpdated => self.entourage_refresh.trigger(now),
            }
        }

        if self.rsvp_refresh.fire(now) {
            debug!("RSVP submitted, refreshing guests");
            self.refresh_guests();
            self.guest_poll.reset(now);
        }
        if self.entourage_refresh.fire(now) {
            debug!("Entourage edited, refreshing");
            self.refresh_entourage();
        }
        if self.guest_poll.due(now) {
            self.refresh_guests();
        }

        self.carousel.tick(self.guests.guests.len(), now);

        if matches!(self.increase, Some(inc) if now >= inc.until) {
            self.increase = None;
        }
    }

    // ===== Queries =====

    /// Guests on the carousel's current page; empty while a transition hides it
    pub fn visible_guests(&self) -> Vec<GuestRecord> {
        if !self.carousel.is_visible() {
            return Vec::new();
        }
        self.guests.page(self.carousel.page_size(), self.carousel.start())
    }

    pub fn increase_marker(&self) -> Option<String> {
        self.increase.map(|inc| format!("+{}", inc.delta))
    }

    pub fn rsvp_refresh_pending(&self) -> bool {
        self.rsvp_refresh.is_pending()
    }

    pub fn entourage_refresh_pending(&self) -> bool {
        self.entourage_refresh.is_pending()
    }

    pub fn select_next_image(&mut self) {
        if !self.gallery.is_empty() {
            self.gallery_selection = (self.gallery_selection + 1).min(self.gallery.len() - 1);
        }
    }

    pub fn select_prev_image(&mut self) {
        self.gallery_selection = self.gallery_selection.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vowboard_core::models::GuestStatus;

    fn test_app(dir: &TempDir) -> App {
        // Nothing listens here, so any spawned fetch fails fast
        let mut config = Config::default();
        config.api_base_url = "http://127.0.0.1:9".to_string();
        config.public_dir = dir.path().join("public");
        let cache = CacheManager::new(dir.path().join("cache")).unwrap();
        App::with_cache(config, cache, Instant::now()).unwrap()
    }

    fn summary(total: u32, names: &[&str]) -> GuestSummary {
        let guests = names
            .iter()
            .map(|n| {
                serde_json::from_value::<GuestRecord>(serde_json::json!({
                    "name": n,
                    "status": "confirmed"
                }))
                .unwrap()
            })
            .collect::<Vec<_>>();
        assert!(guests.iter().all(|g| g.status == GuestStatus::Confirmed));
        GuestSummary {
            total_guests: total,
            rsvp_count: guests.len(),
            guests,
        }
    }

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Guests.next(), Tab::Entourage);
        assert_eq!(Tab::Entourage.next(), Tab::Gallery);
        assert_eq!(Tab::Gallery.next(), Tab::Guests);
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Guests.prev(), Tab::Gallery);
        assert_eq!(Tab::Gallery.prev(), Tab::Entourage);
    }

    #[tokio::test]
    async fn test_increase_marker_only_from_nonzero_total() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let t0 = Instant::now();

        app.apply_guest_summary(summary(3, &["A", "B"]), t0);
        assert_eq!(app.increase_marker(), None);

        app.apply_guest_summary(summary(5, &["A", "B", "C"]), t0);
        assert_eq!(app.increase_marker().as_deref(), Some("+2"));

        app.tick(t0 + Duration::from_secs(1));
        assert!(app.increase_marker().is_some());
        app.tick(t0 + INCREASE_MARKER_DURATION);
        assert_eq!(app.increase_marker(), None);

        app.apply_guest_summary(summary(4, &["A"]), t0);
        assert_eq!(app.increase_marker(), None);
    }

    #[tokio::test]
    async fn test_site_events_schedule_debounced_refresh() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let t0 = Instant::now();

        app.publish(SiteEvent::RsvpUpdated);
        app.publish(SiteEvent::EntourageUpdated);
        app.tick(t0);
        assert!(app.rsvp_refresh_pending());
        assert!(app.entourage_refresh_pending());

        app.tick(t0 + Duration::from_secs(1));
        assert!(app.rsvp_refresh_pending());
        assert!(!app.entourage_refresh_pending());

        app.tick(t0 + Duration::from_secs(2));
        assert!(!app.rsvp_refresh_pending());
    }

    #[tokio::test]
    async fn test_error_keeps_previous_guests() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let t0 = Instant::now();
        app.apply_guest_summary(summary(2, &["A", "B"]), t0);

        app.process_refresh_result(
            RefreshResult::Error {
                message: "Guests: connection refused".into(),
                transient: true,
            },
            t0,
        );
        assert_eq!(app.guests.rsvp_count, 2);
        assert!(!app.guests_unavailable);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Guest list unreachable, will retry. Showing the last one.")
        );

        app.process_refresh_result(
            RefreshResult::Error {
                message: "Guests: Unexpected guest list payload".into(),
                transient: false,
            },
            t0,
        );
        assert_eq!(
            app.status_message.as_deref(),
            Some("Error: Guests: Unexpected guest list payload")
        );
    }

    #[tokio::test]
    async fn test_first_failure_is_not_an_empty_list() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let t0 = Instant::now();

        app.process_refresh_result(
            RefreshResult::Error {
                message: "Guests: connection refused".into(),
                transient: true,
            },
            t0,
        );
        assert!(!app.guests_loaded);
        assert!(app.guests_unavailable);

        app.apply_guest_summary(summary(1, &["A"]), t0);
        assert!(app.guests_loaded);
        assert!(!app.guests_unavailable);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transient() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.refresh_guests();

        let deadline = Instant::now() + Duration::from_secs(10);
        while app.status_message.is_none() && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
            app.check_background_tasks(Instant::now());
        }
        assert_eq!(
            app.status_message.as_deref(),
            Some("Guest list unreachable, will retry. Showing the last one.")
        );
        assert!(app.guests_unavailable);
    }

    #[tokio::test]
    async fn test_entourage_result_builds_layout_and_caches_live_data() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let members = vec![
            EntourageMember::new("P", "Groomsman", "Groomsmen"),
            EntourageMember::new("X", "Bridesmaid", "Bridesmaids"),
        ];

        app.process_refresh_result(
            RefreshResult::Entourage {
                members: members.clone(),
                sponsors: vec![],
                source: EntourageSource::Live,
            },
            Instant::now(),
        );
        assert_eq!(app.layout.len(), 1);
        assert_eq!(app.cache.load_entourage().unwrap().unwrap().data, members);

        app.process_refresh_result(
            RefreshResult::Entourage {
                members: vec![],
                sponsors: vec![],
                source: EntourageSource::Fallback {
                    reason: "no rows".into(),
                },
            },
            Instant::now(),
        );
        assert!(app.entourage_source.is_fallback());
        // Bundled data never overwrites the last live snapshot
        assert_eq!(app.cache.load_entourage().unwrap().unwrap().data, members);
    }

    #[tokio::test]
    async fn test_visible_guests_hidden_during_transition() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let t0 = Instant::now();
        app.apply_guest_summary(summary(6, &["A", "B", "C", "D", "E", "F"]), t0);
        assert_eq!(app.visible_guests().len(), 4);

        app.carousel.next_page(6, t0);
        assert!(app.visible_guests().is_empty());
        app.tick(t0 + app.config.transition());
        let names: Vec<String> = app.visible_guests().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["E", "F", "A", "B"]);
    }

    #[tokio::test]
    async fn test_load_from_cache() {
        let dir = TempDir::new().unwrap();
        {
            let cache = CacheManager::new(dir.path().join("cache")).unwrap();
            cache.save_guests(&summary(1, &["Cached"])).unwrap();
        }
        let mut app = test_app(&dir);
        app.load_from_cache();
        assert!(app.guests_loaded);
        assert_eq!(app.guests.guests[0].name, "Cached");
        assert!(app.last_guest_update.is_some());
        assert!(app.gallery.is_empty());
    }
}
