// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::{UnitsError, WalletError};
use crate::storage::StorageError;

/// Errors raised by marketplace flows.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("{0}")]
    Validation(String),

    #[error("Please connect your wallet first!")]
    WalletNotConnected,

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Listing {0} is an auction; place a bid instead")]
    NotFixedPrice(String),

    #[error("Listing {0} is not an auction")]
    NotAuction(String),

    #[error("Auction for listing {0} has ended")]
    AuctionEnded(String),

    #[error("Listing {0} changed while the transaction was pending")]
    ListingChanged(String),

    #[error("Your bid must be higher than the current price!")]
    BidTooLow,

    #[error("Invalid amount: {0}")]
    Amount(#[from] UnitsError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Listing {0} has an unreadable stored price")]
    InvalidStoredPrice(String),
}

pub type MarketResult<T> = Result<T, MarketError>;
