use chrono::{DateTime, Utc};

use crate::models::guest::parse_timestamp;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Two-letter monogram for a guest card.
/// "Maria Clara Santos" -> "MS", "Cher" -> "CH"
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => {
            let mut out = String::new();
            out.extend(first.chars().next());
            out.extend(last.chars().next());
            out.to_uppercase()
        }
    }
}

/// Format a timestamp for display: "Jan 05, 2026".
/// Missing or unparseable dates read as "Recently".
pub fn format_date(date: Option<&str>) -> String {
    match date.and_then(parse_timestamp) {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => "Recently".to_string(),
    }
}

/// Format a wall-clock time for the status bar: "3:04 PM"
pub fn format_clock(dt: &DateTime<Utc>) -> String {
    let local = dt.with_timezone(&chrono::Local);
    let hour = local.format("%I").to_string().trim_start_matches('0').to_string();
    format!("{}:{}", hour, local.format("%M %p"))
}

/// "1 RSVP entry" / "3 RSVP entries"
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Niño Dela Cruz", 7), "Niño...");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Maria Clara Santos"), "MS");
        assert_eq!(initials("juan dela cruz"), "JC");
        assert_eq!(initials("Cher"), "CH");
        assert_eq!(initials("  "), "");
        assert_eq!(initials("X"), "X");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2026-01-05T10:00:00Z")), "Jan 05, 2026");
        assert_eq!(format_date(Some("2026-02-14")), "Feb 14, 2026");
        assert_eq!(format_date(None), "Recently");
        assert_eq!(format_date(Some("not a date")), "Recently");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "RSVP entry", "RSVP entries"), "1 RSVP entry");
        assert_eq!(pluralize(0, "RSVP entry", "RSVP entries"), "0 RSVP entries");
        assert_eq!(pluralize(5, "Guest", "Guests"), "5 Guests");
    }
}
