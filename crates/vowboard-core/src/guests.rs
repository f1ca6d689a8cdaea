//! Guest aggregation and carousel paging.
//!
//! The guest book shows only confirmed RSVPs: VIPs first, then most
//! recently updated. The list is shown a page at a time and the display
//! layer rotates through pages with `advance_page`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::GuestRecord;

/// Guest cards shown per carousel page.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Keep only records whose RSVP is confirmed, in arrival order.
pub fn filter_confirmed(records: Vec<GuestRecord>) -> Vec<GuestRecord> {
    records.into_iter().filter(|g| g.is_confirmed()).collect()
}

/// Total seats across confirmed RSVPs. Missing or zero counts as one.
/// Saturates rather than wrapping on absurd sheet values.
pub fn aggregate_total(records: &[GuestRecord]) -> u32 {
    records
        .iter()
        .map(GuestRecord::party_size)
        .fold(0u32, u32::saturating_add)
}

/// Stable sort: VIPs ahead of everyone else, then newest `updatedAt` first.
/// Records without a usable timestamp sort as the epoch.
pub fn sort_for_display(records: &mut [GuestRecord]) {
    records.sort_by(|a, b| {
        b.is_vip
            .cmp(&a.is_vip)
            .then_with(|| recency_key(b).cmp(&recency_key(a)))
    });
}

fn recency_key(guest: &GuestRecord) -> DateTime<Utc> {
    guest.updated_at_utc().unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The slice of guests visible on the page starting at `start`.
///
/// When the list is longer than a page the window wraps around the end,
/// so every page is full. Shorter lists are returned whole.
pub fn window_page<T: Clone>(records: &[T], page_size: usize, start: usize) -> Vec<T> {
    if records.len() <= page_size {
        return records.to_vec();
    }
    (0..page_size)
        .map(|i| records[(start + i) % records.len()].clone())
        .collect()
}

/// Next carousel start offset; wraps to 0 once past the end.
pub fn advance_page(start: usize, page_size: usize, total: usize) -> usize {
    let next = start + page_size;
    if next >= total {
        0
    } else {
        next
    }
}

/// Number of carousel pages (indicator dots) for `total` guests.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Zero-based page index of a start offset.
pub fn page_of(start: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        start / page_size
    }
}

/// Everything the guest book needs from one fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestSummary {
    /// Seats across confirmed RSVPs
    pub total_guests: u32,
    /// Number of confirmed RSVP rows
    pub rsvp_count: usize,
    /// Confirmed guests in display order
    pub guests: Vec<GuestRecord>,
}

impl GuestSummary {
    /// Run the full pipeline over a raw fetch: confirmed only, counted, sorted.
    pub fn from_records(records: Vec<GuestRecord>) -> Self {
        let fetched = records.len();
        let mut guests = filter_confirmed(records);
        let total_guests = aggregate_total(&guests);
        sort_for_display(&mut guests);

        debug!(
            fetched,
            confirmed = guests.len(),
            total_guests,
            "Guest summary computed"
        );

        Self {
            total_guests,
            rsvp_count: guests.len(),
            guests,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn page(&self, page_size: usize, start: usize) -> Vec<GuestRecord> {
        window_page(&self.guests, page_size, start)
    }

    /// Whether the carousel should rotate at all
    pub fn needs_paging(&self, page_size: usize) -> bool {
        self.guests.len() > page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuestStatus;

    fn guest(name: &str, allowed: Option<u32>, vip: bool, status: GuestStatus) -> GuestRecord {
        GuestRecord {
            id: Default::default(),
            name: name.to_string(),
            role: String::new(),
            email: None,
            contact: None,
            message: None,
            allowed_guests: allowed,
            companions: vec![],
            table_number: None,
            is_vip: vip,
            status,
            added_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn updated(mut g: GuestRecord, at: &str) -> GuestRecord {
        g.updated_at = Some(at.to_string());
        g
    }

    fn names(records: &[GuestRecord]) -> Vec<&str> {
        records.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_aggregate_total_saturates() {
        let records = vec![
            guest("Big", Some(3_000_000_000), false, GuestStatus::Confirmed),
            guest("Bigger", Some(3_000_000_000), false, GuestStatus::Confirmed),
        ];
        assert_eq!(aggregate_total(&records), u32::MAX);

        let json = r#"[
            {"name": "Big", "allowedGuests": 3000000000, "status": "confirmed"},
            {"name": "Bigger", "allowedGuests": 3000000000, "status": "confirmed"}
        ]"#;
        let parsed: Vec<GuestRecord> = serde_json::from_str(json).unwrap();
        let summary = GuestSummary::from_records(parsed);
        assert_eq!(summary.total_guests, u32::MAX);
        assert_eq!(summary.rsvp_count, 2);
    }

    #[test]
    fn test_summary_scenario() {
        let records = vec![
            guest("A", Some(2), true, GuestStatus::Confirmed),
            guest("B", Some(1), false, GuestStatus::Confirmed),
            guest("C", None, false, GuestStatus::Declined),
        ];
        let summary = GuestSummary::from_records(records);
        assert_eq!(summary.total_guests, 3);
        assert_eq!(summary.rsvp_count, 2);
        assert_eq!(names(&summary.guests), vec!["A", "B"]);
    }

    #[test]
    fn test_filter_confirmed_drops_other_statuses() {
        let records = vec![
            guest("P", None, false, GuestStatus::Pending),
            guest("C", None, false, GuestStatus::Confirmed),
            guest("R", None, false, GuestStatus::Request),
            guest("U", None, false, GuestStatus::Unknown),
        ];
        assert_eq!(names(&filter_confirmed(records)), vec!["C"]);
    }

    #[test]
    fn test_aggregate_total_counts_missing_as_one() {
        let records = vec![
            guest("A", None, false, GuestStatus::Confirmed),
            guest("B", Some(0), false, GuestStatus::Confirmed),
            guest("C", Some(3), false, GuestStatus::Confirmed),
        ];
        assert_eq!(aggregate_total(&records), 5);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate_total(&reversed), 5);
    }

    #[test]
    fn test_sort_vip_beats_recency() {
        let mut records = vec![
            updated(guest("new", None, false, GuestStatus::Confirmed), "2026-05-01T00:00:00Z"),
            guest("vip-undated", None, true, GuestStatus::Confirmed),
            updated(guest("vip-old", None, true, GuestStatus::Confirmed), "2020-01-01T00:00:00Z"),
        ];
        sort_for_display(&mut records);
        assert_eq!(names(&records), vec!["vip-old", "vip-undated", "new"]);
    }

    #[test]
    fn test_sort_recency_and_stability() {
        let mut records = vec![
            guest("undated-1", None, false, GuestStatus::Confirmed),
            updated(guest("older", None, false, GuestStatus::Confirmed), "2025-01-01T00:00:00Z"),
            guest("undated-2", None, false, GuestStatus::Confirmed),
            updated(guest("newer", None, false, GuestStatus::Confirmed), "2025-06-01T00:00:00Z"),
            updated(guest("bad-date", None, false, GuestStatus::Confirmed), "someday"),
        ];
        sort_for_display(&mut records);
        assert_eq!(
            names(&records),
            vec!["newer", "older", "undated-1", "undated-2", "bad-date"]
        );
    }

    #[test]
    fn test_window_page_short_list_is_whole() {
        let items = vec![1, 2, 3];
        assert_eq!(window_page(&items, 4, 0), vec![1, 2, 3]);
        assert_eq!(window_page(&items, 4, 2), vec![1, 2, 3]);
        assert_eq!(window_page(&items, 3, 1), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_page_wraps() {
        let items = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(window_page(&items, 4, 0), vec![1, 2, 3, 4]);
        assert_eq!(window_page(&items, 4, 4), vec![5, 6, 1, 2]);
    }

    #[test]
    fn test_window_page_always_full() {
        let items: Vec<usize> = (0..7).collect();
        for start in 0..items.len() {
            assert_eq!(window_page(&items, 4, start).len(), 4);
        }
    }

    #[test]
    fn test_advance_page_cycles_back_to_zero() {
        let total = 10;
        let page = 4;
        let mut start = 0;
        let mut seen = vec![];
        for _ in 0..page_count(total, page) {
            start = advance_page(start, page, total);
            seen.push(start);
        }
        assert_eq!(seen, vec![4, 8, 0]);
    }

    #[test]
    fn test_advance_page_exact_multiple() {
        assert_eq!(advance_page(0, 4, 8), 4);
        assert_eq!(advance_page(4, 4, 8), 0);
    }

    #[test]
    fn test_page_indicators() {
        assert_eq!(page_count(0, 4), 0);
        assert_eq!(page_count(4, 4), 1);
        assert_eq!(page_count(9, 4), 3);
        assert_eq!(page_of(8, 4), 2);
        assert_eq!(page_of(0, 0), 0);
    }

    #[test]
    fn test_needs_paging() {
        let records: Vec<GuestRecord> = (0..5)
            .map(|i| guest(&i.to_string(), None, false, GuestStatus::Confirmed))
            .collect();
        let summary = GuestSummary::from_records(records);
        assert!(summary.needs_paging(4));
        assert!(!summary.needs_paging(5));
        assert_eq!(summary.page(4, 4).len(), 4);
    }
}
