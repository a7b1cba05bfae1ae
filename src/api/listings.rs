// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    error::ApiError,
    models::{
        CreateListingRequest, CreateListingResponse, ListingQuery, ListingView, PlaceBidRequest,
        TransactionOutcome, TransferPreview,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/listings",
    params(ListingQuery),
    tag = "Listings",
    responses((status = 200, body = [ListingView]))
)]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let now = Utc::now().timestamp();
    let listings = state.market().browse(query.filter).await?;
    Ok(Json(
        listings
            .into_iter()
            .map(|listing| ListingView::new(listing, now))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/listings",
    request_body = CreateListingRequest,
    tag = "Listings",
    responses(
        (status = 201, body = CreateListingResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 503, description = "No wallet or contract not deployed")
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    Json(request): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<CreateListingResponse>), ApiError> {
    let response = state.market().list_item(request, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/v1/listings/{listing_id}",
    params(("listing_id" = String, Path, description = "Listing identifier")),
    tag = "Listings",
    responses((status = 200, body = ListingView), (status = 404))
)]
pub async fn get_listing(
    Path(listing_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ListingView>, ApiError> {
    let listing = state.market().get(&listing_id).await?;
    Ok(Json(ListingView::new(listing, Utc::now().timestamp())))
}

/// What buying the listing would send, for the confirmation step.
#[utoipa::path(
    get,
    path = "/v1/listings/{listing_id}/purchase",
    params(("listing_id" = String, Path, description = "Listing identifier")),
    tag = "Listings",
    responses((status = 200, body = TransferPreview), (status = 428), (status = 409))
)]
pub async fn preview_purchase(
    Path(listing_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TransferPreview>, ApiError> {
    let buyer = state.current_account().await;
    Ok(Json(
        state.market().preview_purchase(&listing_id, buyer).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/v1/listings/{listing_id}/purchase",
    params(("listing_id" = String, Path, description = "Listing identifier")),
    tag = "Listings",
    responses(
        (status = 200, body = TransactionOutcome),
        (status = 428, description = "Wallet not connected"),
        (status = 502, description = "Payment failed")
    )
)]
pub async fn purchase_listing(
    Path(listing_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TransactionOutcome>, ApiError> {
    let buyer = state.current_account().await;
    Ok(Json(state.market().purchase(&listing_id, buyer).await?))
}

#[utoipa::path(
    post,
    path = "/v1/listings/{listing_id}/bids",
    params(("listing_id" = String, Path, description = "Listing identifier")),
    request_body = PlaceBidRequest,
    tag = "Listings",
    responses(
        (status = 200, body = TransactionOutcome),
        (status = 409, description = "Not an open auction or bid too low")
    )
)]
pub async fn place_bid(
    Path(listing_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<PlaceBidRequest>,
) -> Result<Json<TransactionOutcome>, ApiError> {
    let bidder = state.current_account().await;
    let outcome = state
        .market()
        .place_bid(&listing_id, bidder, &request.amount, Utc::now().timestamp())
        .await?;
    Ok(Json(outcome))
}
