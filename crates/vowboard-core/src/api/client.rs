//! API client for the site's spreadsheet-backed endpoints.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fallback;
use crate::models::{EntourageMember, GuestRecord, PrincipalSponsor};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Maximum number of retries for rate-limited (429) requests
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting
const INITIAL_BACKOFF_MS: u64 = 1000;

const GUESTS_PATH: &str = "api/guests";
const ENTOURAGE_PATH: &str = "api/entourage";
const SPONSORS_PATH: &str = "api/principal-sponsor";

/// Where a list shown to the user came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntourageSource {
    /// Fetched from the API
    Live,
    /// The API failed or had nothing; the bundled list is shown instead
    Fallback { reason: String },
}

impl EntourageSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, EntourageSource::Fallback { .. })
    }
}

/// API client for the wedding site.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Every read bypasses intermediary caches; the sheet is edited live.
    fn default_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers
    }

    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .headers(Self::default_headers())
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch every guest row, whatever its status
    pub async fn fetch_guests(&self) -> Result<Vec<GuestRecord>> {
        let url = self.url(GUESTS_PATH);
        let body: Value = self.get(&url).await?;
        let guests = parse_array::<GuestRecord>(body).context("Unexpected guest list payload")?;
        debug!(count = guests.len(), "Fetched guests");
        Ok(guests)
    }

    /// Fetch the entourage sheet as-is. Errors on a non-array payload.
    pub async fn fetch_entourage_live(&self) -> Result<Vec<EntourageMember>> {
        let url = self.url(ENTOURAGE_PATH);
        let body: Value = self.get(&url).await?;
        let members = parse_array::<EntourageMember>(body).context("Unexpected entourage payload")?;
        debug!(count = members.len(), "Fetched entourage");
        Ok(members)
    }

    /// Fetch the principal sponsors, dropping pairs with both names blank
    pub async fn fetch_sponsors_live(&self) -> Result<Vec<PrincipalSponsor>> {
        let url = self.url(SPONSORS_PATH);
        let body: Value = self.get(&url).await?;
        let sponsors: Vec<PrincipalSponsor> = parse_array::<PrincipalSponsor>(body)
            .context("Unexpected principal sponsor payload")?
            .into_iter()
            .filter(|s| !s.is_blank())
            .collect();
        debug!(count = sponsors.len(), "Fetched principal sponsors");
        Ok(sponsors)
    }

    /// Entourage to show: the live sheet, or the bundled list when the
    /// fetch fails or comes back empty.
    pub async fn fetch_entourage(&self) -> (Vec<EntourageMember>, EntourageSource) {
        with_fallback(self.fetch_entourage_live().await, fallback::static_entourage, "entourage")
    }

    /// Principal sponsors to show, with the same fallback behaviour as
    /// [`ApiClient::fetch_entourage`].
    pub async fn fetch_sponsors(&self) -> (Vec<PrincipalSponsor>, EntourageSource) {
        with_fallback(self.fetch_sponsors_live().await, fallback::static_sponsors, "principal sponsors")
    }
}

fn with_fallback<T>(
    fetched: Result<Vec<T>>,
    bundled: impl FnOnce() -> Vec<T>,
    what: &str,
) -> (Vec<T>, EntourageSource) {
    match fetched {
        Ok(items) if !items.is_empty() => (items, EntourageSource::Live),
        Ok(_) => {
            debug!(what, "API returned no rows, using bundled list");
            (
                bundled(),
                EntourageSource::Fallback {
                    reason: "no rows".to_string(),
                },
            )
        }
        Err(e) => {
            warn!(what, error = %e, "Fetch failed, using bundled list");
            (
                bundled(),
                EntourageSource::Fallback {
                    reason: format!("{:#}", e),
                },
            )
        }
    }
}

fn parse_array<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    if !body.is_array() {
        return Err(ApiError::InvalidResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&body)
        ))
        .into());
    }
    Ok(serde_json::from_value(body)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
