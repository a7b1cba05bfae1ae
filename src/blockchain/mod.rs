// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM wallet integration.
//!
//! This module provides functionality for:
//! - Talking to a wallet provider (accounts, network id, transactions)
//! - Converting between ETH amounts and wei
//! - Resolving the deployed marketplace contract and encoding its calls

pub mod client;
pub mod marketplace;
pub mod provider;
pub mod types;
pub mod units;

#[cfg(test)]
pub mod testing;

pub use client::RpcWalletProvider;
pub use marketplace::{MarketplaceArtifact, MarketplaceContext};
pub use provider::{WalletError, WalletProvider};
pub use types::*;
pub use units::{UnitsError, format_ether, parse_ether};
