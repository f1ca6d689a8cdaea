//! In-process site events.
//!
//! Stand-ins for the browser's `rsvpUpdated` / `entourageUpdated` window
//! events: anything may publish, every subscriber sees every event.
//! Events carry no payload; subscribers re-fetch what they need.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Events are tiny and drained every frame, so a small buffer is plenty
const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteEvent {
    /// A guest submitted or changed an RSVP
    RsvpUpdated,
    /// The entourage or sponsor sheet was edited
    EntourageUpdated,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SiteEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.tx.subscribe()
    }

    /// Publish to every current subscriber. Returns how many received it;
    /// publishing with nobody listening is not an error.
    pub fn publish(&self, event: SiteEvent) -> usize {
        match self.tx.send(event) {
            Ok(n) => {
                debug!(?event, subscribers = n, "Site event published");
                n
            }
            Err(_) => {
                debug!(?event, "Site event published with no subscribers");
                0
            }
        }
    }
}

/// Take everything currently queued on a receiver without blocking.
/// A subscriber that fell behind keeps going from the oldest retained event.
pub fn drain(rx: &mut broadcast::Receiver<SiteEvent>) -> Vec<SiteEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Site event subscriber lagged, some events dropped");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    events
}
