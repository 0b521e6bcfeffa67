//! Synchronous notification bus.
//!
//! Responsibilities:
//! - Deliver [`AppEvent`]s to subscribers of the matching kind, in
//!   subscription order, on the emitting thread.
//!
//! Invariants:
//! - Subscribers run outside the internal lock, so a subscriber may emit
//!   further events or subscribe without deadlocking.
//! - Emission with no subscribers is a silent no-op.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::event::{AppEvent, EventKind};

type Subscriber = Arc<dyn Fn(&AppEvent) + Send + Sync + 'static>;

/// Typed publish/subscribe bus for application notifications.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<EventKind, Vec<Subscriber>>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to one event kind.
    pub fn subscribe(&self, kind: EventKind, handler: impl Fn(&AppEvent) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("lock poisoned")
            .entry(kind)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Deliver an event synchronously to every subscriber of its kind.
    pub fn emit(&self, event: AppEvent) {
        trace!(kind = ?event.kind(), "emitting event");
        let subscribers = {
            let map = self.subscribers.lock().expect("lock poisoned");
            map.get(&event.kind()).cloned().unwrap_or_default()
        };
        for subscriber in subscribers {
            subscriber(&event);
        }
    }
}
