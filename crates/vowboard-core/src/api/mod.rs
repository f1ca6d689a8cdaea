//! HTTP client for the spreadsheet-backed site API.
//!
//! The site exposes three read-only JSON endpoints: guests, entourage and
//! principal sponsors. `ApiClient` fetches them; the entourage and sponsor
//! fetches fall back to the bundled lists in [`crate::fallback`].

pub mod client;
pub mod error;

pub use client::{ApiClient, EntourageSource};
pub use error::ApiError;
