// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog change notifications.
//!
//! Every successful catalog write is announced on a broadcast channel so that
//! other open views can refresh. Nobody listening is not an error.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::Listing;

/// Default number of events buffered per subscriber.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A change to the stored catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// The seed catalog was written.
    Initialized { count: usize },
    Added { listing: Listing },
    Updated { listing: Listing },
    Removed { listing_id: String },
}

impl CatalogEvent {
    /// SSE event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            CatalogEvent::Initialized { .. } => "initialized",
            CatalogEvent::Added { .. } => "added",
            CatalogEvent::Updated { .. } => "updated",
            CatalogEvent::Removed { .. } => "removed",
        }
    }
}

/// Sender half of the catalog event channel.
#[derive(Clone)]
pub struct CatalogEvents {
    tx: broadcast::Sender<CatalogEvent>,
}

impl CatalogEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event; returns the number of subscribers reached.
    pub fn publish(&self, event: CatalogEvent) -> usize {
        let name = event.event_name();
        match self.tx.send(event) {
            Ok(receivers) => {
                tracing::debug!(event = name, receivers, "Catalog event published");
                receivers
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }
}

impl Default for CatalogEvents {
    fn default() -> Self {
        Self::new(EVENT_CHANNEL_CAPACITY)
    }
}
