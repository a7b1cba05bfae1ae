// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::ApiError, models::WalletStatusResponse, session::WalletSession, state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/wallet",
    tag = "Wallet",
    responses((status = 200, body = WalletStatusResponse))
)]
pub async fn wallet_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    Json(state.session.read().await.status())
}

/// Request account access; the first account becomes the session account.
#[utoipa::path(
    post,
    path = "/v1/wallet/connect",
    tag = "Wallet",
    responses(
        (status = 200, body = WalletStatusResponse),
        (status = 503, description = "No wallet provider configured"),
        (status = 502, description = "Wallet refused or unreachable")
    )
)]
pub async fn connect_wallet(
    State(state): State<AppState>,
) -> Result<Json<WalletStatusResponse>, ApiError> {
    let wallet = wallet_provider(&state)?;
    let session = WalletSession::connect(wallet.as_ref()).await?;
    *state.session.write().await = session;
    Ok(Json(session.status()))
}

/// Re-read the wallet's accounts, following account switches.
#[utoipa::path(
    post,
    path = "/v1/wallet/refresh",
    tag = "Wallet",
    responses((status = 200, body = WalletStatusResponse))
)]
pub async fn refresh_wallet(
    State(state): State<AppState>,
) -> Result<Json<WalletStatusResponse>, ApiError> {
    let wallet = wallet_provider(&state)?;
    let session = WalletSession::refresh(wallet.as_ref()).await?;
    *state.session.write().await = session;
    Ok(Json(session.status()))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/disconnect",
    tag = "Wallet",
    responses((status = 200, body = WalletStatusResponse))
)]
pub async fn disconnect_wallet(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    let mut session = state.session.write().await;
    *session = WalletSession::Disconnected;
    tracing::info!("Wallet disconnected");
    Json(session.status())
}

fn wallet_provider(
    state: &AppState,
) -> Result<std::sync::Arc<dyn crate::blockchain::WalletProvider>, ApiError> {
    state
        .wallet
        .clone()
        .ok_or_else(|| crate::blockchain::WalletError::NotDetected.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{connected_state, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn connect_without_provider_is_unavailable() {
        let (_dir, state) = test_state();
        let err = connect_wallet(State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn connect_then_disconnect() {
        let (_dir, state, wallet) = connected_state().await;

        let Json(status) = wallet_status(State(state.clone())).await;
        assert!(status.connected);
        assert_eq!(
            status.account.map(|a| a.0),
            Some(wallet.accounts[0].to_string())
        );

        let Json(status) = disconnect_wallet(State(state.clone())).await;
        assert!(!status.connected);
        assert!(state.current_account().await.is_none());

        let Json(status) = refresh_wallet(State(state)).await.unwrap();
        assert!(status.connected);
        assert_eq!(status.network_name.as_deref(), Some("Ganache"));
    }
}
