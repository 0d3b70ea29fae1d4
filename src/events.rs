//! Lifecycle notifications for the presentation layer.
//!
//! Stores publish these on a broadcast channel; renderers and visual effects
//! subscribe without the stores knowing anything about them. Publishing never
//! blocks and is a no-op when nobody is listening.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::types::ProductId;

/// Capacity of the broadcast channel. Slow subscribers observe `Lagged`.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notification event sent when view state changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The catalog fetch completed
    DatasetLoaded { count: usize },
    /// The catalog fetch failed
    DatasetFailed { message: String },
    /// A new search term was applied
    FilterApplied { term: String, matches: usize },
    /// The listing moved to another page
    PageChanged { page: usize, max_page: usize },
    /// A detail fetch completed with a product
    ProductLoaded { id: ProductId },
    /// A detail fetch ended without a product
    ProductUnavailable { id: ProductId },
    /// The detail view switched to another image
    ImageChanged { index: usize },
}

/// Sending half shared by the stores of one session.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: StoreEvent) {
        // Err only means there are no subscribers
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}
