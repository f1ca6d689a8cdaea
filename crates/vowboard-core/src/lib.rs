//! Vowboard core library.
//!
//! Everything the wedding board needs that is not tied to a particular
//! display surface:
//!
//! - `api`: HTTP client for the spreadsheet-backed guest/entourage API
//! - `models`: guest, entourage and sponsor records
//! - `guests`: confirmed-guest aggregation, sorting and carousel paging
//! - `entourage`: grouping and pairing of the wedding party into layout blocks
//! - `gallery`: image directory scanning
//! - `fallback`: bundled entourage/sponsor lists used when the API is empty
//! - `cache`: local snapshots so the board starts with the last good data
//! - `config`: persisted configuration
//! - `events`: in-process site events ("RSVP submitted", "entourage updated")
//! - `schedule`: interval and debounce timers driven by the caller's clock

pub mod api;
pub mod cache;
pub mod config;
pub mod entourage;
pub mod events;
pub mod fallback;
pub mod gallery;
pub mod guests;
pub mod models;
pub mod schedule;
pub mod utils;
