//! Utility functions for string formatting.

pub mod format;

pub use format::{format_clock, format_date, initials, pluralize, truncate_string};
