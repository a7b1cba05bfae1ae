// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    error::ApiError, market::CatalogEvent, models::CatalogResetResponse, state::AppState,
};

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Overwrite the catalog with the seed listings.
#[utoipa::path(
    post,
    path = "/v1/catalog/reset",
    tag = "Catalog",
    responses((status = 200, body = CatalogResetResponse))
)]
pub async fn reset_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogResetResponse>, ApiError> {
    let count = state.market().reset_catalog().await?;
    tracing::info!(count, "Catalog reset");
    Ok(Json(CatalogResetResponse { count }))
}

/// Stream catalog changes as Server-Sent Events.
///
/// Event names are `initialized`, `added`, `updated` and `removed`; the data
/// is the JSON-encoded change.
#[utoipa::path(
    get,
    path = "/v1/catalog/events",
    tag = "Catalog",
    responses((status = 200, description = "text/event-stream of catalog changes"))
)]
pub async fn catalog_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    Sse::new(event_stream(state.events.subscribe()))
        .keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}

fn event_stream(
    rx: broadcast::Receiver<CatalogEvent>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse = Event::default().event(event.event_name()).json_data(&event);
                    return Some((sse, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Catalog event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::test_state;
    use crate::market::CatalogEvents;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn reset_reports_seed_count() {
        let (_dir, state) = test_state();
        let mut rx = state.events.subscribe();

        let Json(body) = reset_catalog(State(state)).await.unwrap();
        assert_eq!(body.count, 6);
        assert_eq!(rx.recv().await.unwrap(), CatalogEvent::Initialized { count: 6 });
    }

    #[tokio::test]
    async fn stream_yields_published_events() {
        let events = CatalogEvents::new(4);
        let stream = event_stream(events.subscribe());
        tokio::pin!(stream);

        events.publish(CatalogEvent::Removed {
            listing_id: "1".to_string(),
        });
        assert!(stream.next().await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn stream_skips_lagged_events_and_ends_when_closed() {
        let events = CatalogEvents::new(1);
        let stream = event_stream(events.subscribe());
        tokio::pin!(stream);

        for id in ["1", "2", "3"] {
            events.publish(CatalogEvent::Removed {
                listing_id: id.to_string(),
            });
        }
        assert!(stream.next().await.unwrap().is_ok());

        drop(events);
        assert!(stream.next().await.is_none());
    }
}
