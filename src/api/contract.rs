// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{error::ApiError, models::TransactionOutcome, state::AppState};

/// Call the contract's payable `buy()` with 0.1 ETH.
#[utoipa::path(
    post,
    path = "/v1/contract/buy",
    tag = "Contract",
    responses(
        (status = 200, body = TransactionOutcome),
        (status = 428, description = "Wallet not connected"),
        (status = 503, description = "Contract not deployed on this network")
    )
)]
pub async fn contract_buy(
    State(state): State<AppState>,
) -> Result<Json<TransactionOutcome>, ApiError> {
    let account = state.current_account().await;
    Ok(Json(state.market().contract_buy(account).await?))
}

/// Call the contract's `faucet()`.
#[utoipa::path(
    post,
    path = "/v1/contract/faucet",
    tag = "Contract",
    responses(
        (status = 200, body = TransactionOutcome),
        (status = 428, description = "Wallet not connected")
    )
)]
pub async fn contract_faucet(
    State(state): State<AppState>,
) -> Result<Json<TransactionOutcome>, ApiError> {
    let account = state.current_account().await;
    Ok(Json(state.market().contract_faucet(account).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{connected_state, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn faucet_requires_session() {
        let (_dir, state) = test_state();
        let err = contract_faucet(State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::PRECONDITION_REQUIRED);
    }

    #[tokio::test]
    async fn buy_sends_to_contract() {
        let (_dir, state, wallet) = connected_state().await;
        let Json(outcome) = contract_buy(State(state)).await.unwrap();

        assert_eq!(outcome.message, "Bought for 0.1 ETH!");
        assert_eq!(wallet.sent().len(), 1);
    }
}
