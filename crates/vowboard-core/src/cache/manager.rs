use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::guests::GuestSummary;
use crate::models::{EntourageMember, PrincipalSponsor};

/// Snapshots older than this are flagged in the status bar.
/// The board polls every 30s, so anything this old means the API has been down a while.
const CACHE_STALE_MINUTES: i64 = 15;

const GUESTS: &str = "guests";
const ENTOURAGE: &str = "entourage";
const SPONSORS: &str = "sponsors";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    /// "just now", "5m ago", "2h ago", "3d ago"; hours and days round to nearest
    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        match minutes {
            // Clock skew lands here too
            m if m < 1 => "just now".to_string(),
            m if m < 60 => format!("{}m ago", m),
            m if m < 24 * 60 => format!("{}h ago", (m + 30) / 60),
            m => format!("{}d ago", (m + 12 * 60) / (24 * 60)),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        debug!(cache = name, age = %cached.age_display(), "Loaded cached snapshot");
        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let contents = serde_json::to_string_pretty(&cached)?;
        // Write then rename so a crash mid-write never leaves a half file behind
        let tmp = self.cache_path(&format!("{}.tmp", name));
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        std::fs::rename(&tmp, self.cache_path(name))?;
        Ok(())
    }

    // ===== Guests =====

    pub fn load_guests(&self) -> Result<Option<CachedData<GuestSummary>>> {
        self.load(GUESTS)
    }

    pub fn save_guests(&self, summary: &GuestSummary) -> Result<()> {
        self.save(GUESTS, summary)
    }

    // ===== Entourage =====

    pub fn load_entourage(&self) -> Result<Option<CachedData<Vec<EntourageMember>>>> {
        self.load(ENTOURAGE)
    }

    pub fn save_entourage(&self, members: &[EntourageMember]) -> Result<()> {
        self.save(ENTOURAGE, &members)
    }

    pub fn load_sponsors(&self) -> Result<Option<CachedData<Vec<PrincipalSponsor>>>> {
        self.load(SPONSORS)
    }

    pub fn save_sponsors(&self, sponsors: &[PrincipalSponsor]) -> Result<()> {
        self.save(SPONSORS, &sponsors)
    }

    // ===== Cache Age Information =====

    fn load_age<T>(&self, name: &str, loader: impl FnOnce() -> Result<Option<CachedData<T>>>) -> Option<(String, bool)> {
        match loader() {
            Ok(Some(cached)) => Some((cached.age_display(), cached.is_stale())),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        let guests = self.load_age(GUESTS, || self.load_guests());
        let entourage = self.load_age(ENTOURAGE, || self.load_entourage());
        CacheAges {
            any_stale: [&guests, &entourage]
                .iter()
                .any(|age| age.as_ref().map(|(_, stale)| *stale).unwrap_or(true)),
            guests: guests.map(|(age, _)| age),
            entourage: entourage.map(|(age, _)| age),
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub guests: Option<String>,
    pub entourage: Option<String>,
    /// Missing snapshots count as stale
    pub any_stale: bool,
}

impl CacheAges {
    pub fn entourage_age(&self) -> &str {
        self.entourage.as_deref().unwrap_or("never")
    }
}

// ============================================================================
// Tests
// ============================================================================
