// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider abstraction.
//!
//! The marketplace talks to a wallet the way a dApp talks to an injected
//! browser wallet: ask for account access, read the network id, list
//! accounts and submit transactions. Nothing else is assumed.

use alloy::primitives::Address;
use async_trait::async_trait;

use super::types::{TransferRequest, TxReceipt};

/// Account access and transaction submission.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for account access.
    ///
    /// Fails with [`WalletError::NoAccounts`] when the wallet exposes none.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Accounts currently exposed by the wallet (may be empty).
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Network id of the connected chain.
    async fn network_id(&self) -> Result<u64, WalletError>;

    /// Submit a transaction and wait for its receipt.
    ///
    /// A reverted transaction is reported as [`WalletError::TransactionFailed`].
    async fn send_transaction(&self, tx: TransferRequest) -> Result<TxReceipt, WalletError>;
}

/// Errors that can occur during wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider detected. Configure RPC_URL and restart the server.")]
    NotDetected,

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Account access denied: {0}")]
    AccessDenied(String),

    #[error("Wallet exposes no accounts")]
    NoAccounts,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error(
        "Marketplace contract not deployed to network ID {network_id}. Make sure your \
         target network is running and the contracts have been migrated."
    )]
    ContractNotDeployed { network_id: u64 },

    #[error("Contract artifact error: {0}")]
    Artifact(String),
}
