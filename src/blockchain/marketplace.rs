// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Marketplace contract artifact and calls.
//!
//! The artifact is the Truffle build output (`build/contracts/Marketplace.json`).
//! Only the contract name and the deployment address per network id are read;
//! calls are encoded from the `sol!` interface below. Listing, buying and
//! bidding never call the contract; only the demo `buy` and `faucet`
//! endpoints do.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolCall,
};
use serde::Deserialize;

use super::provider::{WalletError, WalletProvider};
use super::types::TransferRequest;
use super::units::parse_ether;

sol! {
    interface IMarketplace {
        function buy() external payable;
        function faucet() external;
    }
}

/// Value sent with the demo `buy()` call.
pub const DEMO_BUY_PRICE_ETH: &str = "0.1";

/// One network entry of the artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    pub address: String,
}

/// Compiled contract artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceArtifact {
    #[serde(default, rename = "contractName")]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub networks: HashMap<String, Deployment>,
}

impl MarketplaceArtifact {
    /// Load the artifact from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Artifact(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parse the artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, WalletError> {
        serde_json::from_str(raw).map_err(|e| WalletError::Artifact(e.to_string()))
    }

    /// Contract address deployed on `network_id`.
    pub fn deployment(&self, network_id: u64) -> Result<Address, WalletError> {
        let deployment = self
            .networks
            .get(&network_id.to_string())
            .ok_or(WalletError::ContractNotDeployed { network_id })?;

        Address::from_str(&deployment.address)
            .map_err(|e| WalletError::InvalidAddress(format!("{}: {e}", deployment.address)))
    }
}

/// Everything needed to act on the deployed marketplace contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceContext {
    /// Deployed contract address on the current network
    pub contract: Address,
    /// Network the wallet is connected to
    pub network_id: u64,
    /// Accounts exposed by the wallet
    pub accounts: Vec<Address>,
}

impl MarketplaceContext {
    /// Request account access, detect the network and find the deployment.
    pub async fn resolve(
        wallet: &dyn WalletProvider,
        artifact: Option<&MarketplaceArtifact>,
    ) -> Result<Self, WalletError> {
        wallet.request_accounts().await?;

        let network_id = wallet.network_id().await?;
        let artifact = artifact.ok_or_else(|| {
            WalletError::Artifact("Marketplace contract artifact is not loaded".to_string())
        })?;
        let contract = artifact.deployment(network_id)?;

        let accounts = wallet.accounts().await?;
        tracing::debug!(
            network_id,
            %contract,
            accounts = accounts.len(),
            "Resolved marketplace contract"
        );

        Ok(Self {
            contract,
            network_id,
            accounts,
        })
    }

    /// The account that acts for the user (the first one).
    pub fn account(&self) -> Result<Address, WalletError> {
        self.accounts.first().copied().ok_or(WalletError::NoAccounts)
    }

    /// `buy()` paying the demo price.
    pub fn buy_request(&self, from: Address) -> Result<TransferRequest, WalletError> {
        let value = parse_ether(DEMO_BUY_PRICE_ETH)
            .map_err(|e| WalletError::TransactionFailed(e.to_string()))?;
        Ok(self.call(from, value, IMarketplace::buyCall {}.abi_encode()))
    }

    /// `faucet()` with no value attached.
    pub fn faucet_request(&self, from: Address) -> TransferRequest {
        self.call(from, U256::ZERO, IMarketplace::faucetCall {}.abi_encode())
    }

    fn call(&self, from: Address, value: U256, data: Vec<u8>) -> TransferRequest {
        TransferRequest {
            from,
            to: self.contract,
            value,
            data: Some(data),
        }
    }
}
