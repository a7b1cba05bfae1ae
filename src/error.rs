// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::WalletError;
use crate::market::MarketError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// The wallet must be connected before retrying.
    pub fn precondition_required(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PRECONDITION_REQUIRED, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        let message = err.to_string();
        match err {
            WalletError::NotDetected
            | WalletError::ContractNotDeployed { .. }
            | WalletError::Artifact(_) => Self::service_unavailable(message),
            WalletError::InvalidAddress(_) => Self::internal(message),
            WalletError::InvalidRpcUrl(_)
            | WalletError::AccessDenied(_)
            | WalletError::NoAccounts
            | WalletError::InvalidPrivateKey(_)
            | WalletError::Rpc(_)
            | WalletError::TransactionFailed(_) => Self::bad_gateway(message),
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        let message = err.to_string();
        match err {
            MarketError::Validation(_) | MarketError::Amount(_) => Self::bad_request(message),
            MarketError::WalletNotConnected => Self::precondition_required(message),
            MarketError::NotFound(_) => Self::not_found(message),
            MarketError::NotFixedPrice(_)
            | MarketError::NotAuction(_)
            | MarketError::AuctionEnded(_)
            | MarketError::ListingChanged(_)
            | MarketError::BidTooLow => Self::conflict(message),
            MarketError::Wallet(wallet) => wallet.into(),
            MarketError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                Self::internal(message)
            }
            MarketError::InvalidStoredPrice(_) => Self::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
