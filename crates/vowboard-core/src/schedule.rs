//! Timers driven by the caller's clock.
//!
//! Nothing here sleeps or spawns. The owner passes `Instant::now()` (or a
//! fake instant in tests) on every tick and acts on what comes back.

use std::time::{Duration, Instant};

/// Fires every `period`. Missed periods collapse into one firing.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// First firing is one full period after `now`
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// True at most once per period; re-arms from `now` when it fires.
    pub fn due(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.period;
            true
        } else {
            false
        }
    }

    /// Restart the period from `now`, e.g. after a manual refresh
    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.period;
    }
}

/// One-shot delay. Triggering again while pending pushes the deadline out,
/// so a burst of triggers fires once, `delay` after the last one.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    fire_at: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fire_at: None }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.fire_at = Some(now + self.delay);
    }

    /// True once when the deadline has passed, then disarms
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.fire_at {
            Some(at) if now >= at => {
                self.fire_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.fire_at.is_some()
    }

    pub fn cancel(&mut self) {
        self.fire_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_interval_fires_once_per_period() {
        let start = Instant::now();
        let mut interval = Interval::new(5 * SEC, start);

        assert!(!interval.due(start));
        assert!(!interval.due(start + 4 * SEC));
        assert!(interval.due(start + 5 * SEC));
        assert!(!interval.due(start + 6 * SEC));
        assert!(interval.due(start + 10 * SEC));
    }

    #[test]
    fn test_interval_collapses_missed_periods() {
        let start = Instant::now();
        let mut interval = Interval::new(SEC, start);
        assert!(interval.due(start + 10 * SEC));
        assert!(!interval.due(start + 10 * SEC + Duration::from_millis(500)));
        assert!(interval.due(start + 11 * SEC));
    }

    #[test]
    fn test_interval_reset() {
        let start = Instant::now();
        let mut interval = Interval::new(30 * SEC, start);
        interval.reset(start + 20 * SEC);
        assert!(!interval.due(start + 30 * SEC));
        assert!(interval.due(start + 50 * SEC));
    }

    #[test]
    fn test_debounce_fires_once_after_delay() {
        let start = Instant::now();
        let mut debounce = Debounce::new(2 * SEC);
        assert!(!debounce.fire(start + 10 * SEC));

        debounce.trigger(start);
        assert!(debounce.is_pending());
        assert!(!debounce.fire(start + SEC));
        assert!(debounce.fire(start + 2 * SEC));
        assert!(!debounce.fire(start + 3 * SEC));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_debounce_retrigger_pushes_deadline() {
        let start = Instant::now();
        let mut debounce = Debounce::new(2 * SEC);
        debounce.trigger(start);
        debounce.trigger(start + SEC);
        assert!(!debounce.fire(start + 2 * SEC));
        assert!(debounce.fire(start + 3 * SEC));
    }

    #[test]
    fn test_debounce_cancel() {
        let start = Instant::now();
        let mut debounce = Debounce::new(SEC);
        debounce.trigger(start);
        debounce.cancel();
        assert!(!debounce.fire(start + 5 * SEC));
    }
}
