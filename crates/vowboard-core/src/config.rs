//! Application configuration management.
//!
//! Configuration is stored at `~/.config/vowboard/config.json`. Every field
//! has a default, so a missing file or a partial one both load cleanly.
//! `VOWBOARD_API_URL` in the environment overrides the API base URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gallery::GallerySort;
use crate::guests::DEFAULT_PAGE_SIZE;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "vowboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `api_base_url` for one run
pub const API_URL_ENV: &str = "VOWBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site origin serving `/api/guests`, `/api/entourage` and `/api/principal-sponsor`
    pub api_base_url: String,
    /// Directory holding `mobile-background/` and `desktop-background/`
    pub public_dir: PathBuf,
    /// Guest cards per carousel page
    pub page_size: usize,
    pub poll_interval_secs: u64,
    pub carousel_interval_secs: u64,
    pub transition_ms: u64,
    /// Delay before re-fetching guests after an RSVP is submitted
    pub rsvp_refresh_delay_ms: u64,
    /// Delay before re-fetching the entourage after it is edited
    pub entourage_refresh_delay_ms: u64,
    pub gallery_sort: GallerySort,
    /// `VOWBOARD_API_URL` for this run only; never written back
    #[serde(skip)]
    api_url_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            public_dir: PathBuf::from("public"),
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval_secs: 30,
            carousel_interval_secs: 5,
            transition_ms: 300,
            rsvp_refresh_delay_ms: 2000,
            entourage_refresh_delay_ms: 1000,
            gallery_sort: GallerySort::Numeric,
            api_url_override: None,
        }
    }
}

impl Config {
    /// Load from the standard location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn apply_env_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url_override = Some(url.trim().to_string());
        }
    }

    /// Base URL to talk to: the environment override if set, else the file's
    pub fn api_url(&self) -> &str {
        self.api_url_override.as_deref().unwrap_or(&self.api_base_url)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_secs(self.carousel_interval_secs)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn rsvp_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.rsvp_refresh_delay_ms)
    }

    pub fn entourage_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.entourage_refresh_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 4);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base_url": "https://example.com", "page_size": 0}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "https://example.com");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.gallery_sort, GallerySort::Numeric);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            gallery_sort: GallerySort::Lexicographic,
            transition_ms: 500,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_override(Some("  https://wedding.example  ".to_string()));
        assert_eq!(config.api_url(), "https://wedding.example");
        assert_eq!(config.api_base_url, "http://localhost:3000");

        config.apply_env_override(Some("   ".to_string()));
        assert_eq!(config.api_url(), "https://wedding.example");

        config.apply_env_override(None);
        assert_eq!(config.api_url(), "https://wedding.example");
    }

    #[test]
    fn test_env_override_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.apply_env_override(Some("https://staging.example".to_string()));
        config.gallery_sort = GallerySort::Lexicographic;
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("staging"));
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api_url(), "http://localhost:3000");
        assert_eq!(reloaded.gallery_sort, GallerySort::Lexicographic);
    }
}
