// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet connection state.
//!
//! The server keeps one session, the way a page keeps the account its
//! injected wallet handed out. `refresh` plays the role of the wallet's
//! "accounts changed" notification.

use alloy::primitives::Address;

use crate::blockchain::{known_network, WalletError, WalletProvider};
use crate::models::{WalletAddress, WalletStatusResponse};

/// Current wallet connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletSession {
    #[default]
    Disconnected,
    Connected { account: Address, network_id: u64 },
}

impl WalletSession {
    /// Ask the wallet for access and take its first account.
    pub async fn connect(wallet: &dyn WalletProvider) -> Result<Self, WalletError> {
        let accounts = wallet.request_accounts().await?;
        let account = accounts.first().copied().ok_or(WalletError::NoAccounts)?;
        let network_id = wallet.network_id().await?;

        tracing::info!(%account, network_id, "Wallet connected");
        Ok(Self::Connected {
            account,
            network_id,
        })
    }

    /// Re-read the wallet's accounts without prompting.
    ///
    /// An empty account list disconnects the session.
    pub async fn refresh(wallet: &dyn WalletProvider) -> Result<Self, WalletError> {
        let Some(account) = wallet.accounts().await?.first().copied() else {
            tracing::info!("Wallet exposes no accounts; session disconnected");
            return Ok(Self::Disconnected);
        };
        let network_id = wallet.network_id().await?;

        Ok(Self::Connected {
            account,
            network_id,
        })
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            Self::Connected { account, .. } => Some(*account),
            Self::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn status(&self) -> WalletStatusResponse {
        match *self {
            Self::Disconnected => WalletStatusResponse {
                connected: false,
                account: None,
                network_id: None,
                network_name: None,
                explorer_url: None,
            },
            Self::Connected {
                account,
                network_id,
            } => {
                let network = known_network(network_id);
                WalletStatusResponse {
                    connected: true,
                    account: Some(WalletAddress(account.to_string())),
                    network_id: Some(network_id),
                    network_name: network.map(|n| n.name.to_string()),
                    explorer_url: network
                        .and_then(|n| n.explorer_url)
                        .map(str::to_string),
                }
            }
        }
    }
}
