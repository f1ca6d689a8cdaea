//! Guest carousel state machine.
//!
//! Every `interval` the carousel starts a short transition; the page is
//! hidden while it runs, then the start offset advances. Lists that fit on
//! one page never rotate.

use std::time::{Duration, Instant};

use vowboard_core::guests::{advance_page, page_count, page_of};
use vowboard_core::schedule::{Debounce, Interval};

#[derive(Debug, Clone)]
pub struct Carousel {
    page_size: usize,
    start: usize,
    /// Offset to show once the running transition ends
    pending_start: Option<usize>,
    advance: Interval,
    transition: Debounce,
}

impl Carousel {
    pub fn new(page_size: usize, interval: Duration, transition: Duration, now: Instant) -> Self {
        Self {
            page_size: page_size.max(1),
            start: 0,
            pending_start: None,
            advance: Interval::new(interval, now),
            transition: Debounce::new(transition),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// False while a transition is hiding the page
    pub fn is_visible(&self) -> bool {
        self.pending_start.is_none()
    }

    pub fn current_page(&self) -> usize {
        page_of(self.start, self.page_size)
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    /// Advance the state machine. `total` is the current guest count.
    pub fn tick(&mut self, total: usize, now: Instant) {
        if total <= self.page_size {
            self.start = 0;
            self.pending_start = None;
            self.transition.cancel();
            self.advance.reset(now);
            return;
        }

        if self.pending_start.is_some() {
            if self.transition.fire(now) {
                if let Some(next) = self.pending_start.take() {
                    self.start = next;
                }
            }
            return;
        }

        if self.advance.due(now) {
            self.begin_transition(advance_page(self.start, self.page_size, total), now);
        }
    }

    /// Jump straight to a page (an indicator dot). Out-of-range pages are ignored.
    pub fn jump_to(&mut self, page: usize, total: usize, now: Instant) {
        if page >= self.page_count(total) {
            return;
        }
        let target = page * self.page_size;
        if target == self.start && self.pending_start.is_none() {
            return;
        }
        self.begin_transition(target, now);
        self.advance.reset(now);
    }

    pub fn next_page(&mut self, total: usize, now: Instant) {
        let count = self.page_count(total);
        if count > 1 {
            self.jump_to((self.current_page() + 1) % count, total, now);
        }
    }

    pub fn prev_page(&mut self, total: usize, now: Instant) {
        let count = self.page_count(total);
        if count > 1 {
            self.jump_to((self.current_page() + count - 1) % count, total, now);
        }
    }

    /// Keep the offset valid after the guest list changed size
    pub fn clamp(&mut self, total: usize) {
        if self.start >= total {
            self.start = 0;
        }
        if matches!(self.pending_start, Some(next) if next >= total) {
            self.pending_start = Some(0);
        }
    }

    fn begin_transition(&mut self, next: usize, now: Instant) {
        self.pending_start = Some(next);
        self.transition.trigger(now);
    }
}
