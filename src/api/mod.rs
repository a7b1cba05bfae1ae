// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CatalogResetResponse, CreateListingRequest, CreateListingResponse, ImageUpload, Listing,
        ListingView, PlaceBidRequest, SaleFilter, SaleType, TransactionOutcome, TransferPreview,
        WalletAddress, WalletStatusResponse,
    },
    state::AppState,
};

pub mod catalog;
pub mod contract;
pub mod health;
pub mod listings;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/listings",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/listings/{listing_id}", get(listings::get_listing))
        .route(
            "/listings/{listing_id}/purchase",
            get(listings::preview_purchase).post(listings::purchase_listing),
        )
        .route("/listings/{listing_id}/bids", post(listings::place_bid))
        .route("/catalog/reset", post(catalog::reset_catalog))
        .route("/catalog/events", get(catalog::catalog_events))
        .route("/wallet", get(wallet::wallet_status))
        .route("/wallet/connect", post(wallet::connect_wallet))
        .route("/wallet/refresh", post(wallet::refresh_wallet))
        .route("/wallet/disconnect", post(wallet::disconnect_wallet))
        .route("/contract/buy", post(contract::contract_buy))
        .route("/contract/faucet", post(contract::contract_faucet));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        listings::list_listings,
        listings::create_listing,
        listings::get_listing,
        listings::preview_purchase,
        listings::purchase_listing,
        listings::place_bid,
        catalog::reset_catalog,
        catalog::catalog_events,
        wallet::wallet_status,
        wallet::connect_wallet,
        wallet::refresh_wallet,
        wallet::disconnect_wallet,
        contract::contract_buy,
        contract::contract_faucet
    ),
    components(
        schemas(
            Listing,
            ListingView,
            WalletAddress,
            SaleFilter,
            SaleType,
            ImageUpload,
            CreateListingRequest,
            CreateListingResponse,
            PlaceBidRequest,
            TransferPreview,
            TransactionOutcome,
            CatalogResetResponse,
            WalletStatusResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Listings", description = "Browse, list, buy and bid"),
        (name = "Catalog", description = "Catalog maintenance and change stream"),
        (name = "Wallet", description = "Wallet connection session"),
        (name = "Contract", description = "Marketplace contract demo calls")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::blockchain::testing::MockWallet;
    use crate::blockchain::MarketplaceArtifact;
    use crate::session::WalletSession;
    use crate::state::AppState;
    use crate::storage::{ListingRepository, LocalStorage, StoragePaths};

    const ARTIFACT: &str = r#"{
        "contractName": "Marketplace",
        "abi": [],
        "networks": {"5777": {"address": "0x1111111111111111111111111111111111111111"}}
    }"#;

    /// Seeded catalog, no wallet, no artifact.
    pub(crate) fn test_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let mut storage = LocalStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().unwrap();
        ListingRepository::new(&storage).initialize(false).unwrap();
        (dir, AppState::new(storage))
    }

    /// Seeded catalog with a mock wallet on Ganache and a connected session.
    pub(crate) async fn connected_state() -> (TempDir, AppState, Arc<MockWallet>) {
        let (dir, state) = test_state();
        let wallet = Arc::new(MockWallet::new(5777));
        let state = state
            .with_wallet(wallet.clone())
            .with_artifact(MarketplaceArtifact::from_json(ARTIFACT).unwrap());

        let session = WalletSession::connect(wallet.as_ref()).await.unwrap();
        *state.session.write().await = session;
        (dir, state, wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use testing::{connected_state, test_state};

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (_dir, state) = test_state();
        let _ = router(state).into_make_service();
    }

    #[tokio::test]
    async fn browse_filter_via_query_string() {
        let (_dir, state) = test_state();
        let (status, body) = send(router(state), "GET", "/v1/listings?filter=fixed", None).await;

        assert_eq!(status, StatusCode::OK);
        let listings: Vec<ListingView> = serde_json::from_str(&body).unwrap();
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().all(|l| !l.listing.is_auction));
        assert!(body.contains(r#""isAuctionActive":false"#));
    }

    #[tokio::test]
    async fn unknown_filter_is_rejected() {
        let (_dir, state) = test_state();
        let (status, _) = send(router(state), "GET", "/v1/listings?filter=rare", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bid_flow_over_http() {
        let (_dir, state, _wallet) = connected_state().await;
        let app = router(state);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/v1/listings/3/bids",
            Some(r#"{"amount":"1.25"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let outcome: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(outcome["listing"]["price"], "1250000000000000000");

        let (status, body) = send(app, "POST", "/v1/listings/3/bids", Some(r#"{"amount":"1"}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            r#"{"error":"Your bid must be higher than the current price!"}"#
        );
    }

    #[tokio::test]
    async fn wallet_session_over_http() {
        let (_dir, state, _wallet) = connected_state().await;
        let app = router(state);

        let (status, body) = send(app.clone(), "POST", "/v1/wallet/disconnect", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"connected":false}"#);

        let (status, _) = send(app, "POST", "/v1/listings/1/purchase", None).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    }

    #[tokio::test]
    async fn event_stream_is_served() {
        let (_dir, state) = test_state();
        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/catalog/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn health_and_docs_are_mounted() {
        let (_dir, state) = test_state();
        let app = router(state);

        let (status, _) = send(app.clone(), "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/v1/listings/{listing_id}/bids"));
    }
}
