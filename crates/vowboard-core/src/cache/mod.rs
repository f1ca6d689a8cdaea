//! Local snapshot cache.
//!
//! The last good guest summary, entourage and sponsor lists are kept as
//! JSON files so the board can start with something to show before the
//! first fetch completes.

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
