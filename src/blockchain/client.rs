// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-RPC wallet provider backed by an EVM node.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;

use super::provider::{WalletError, WalletProvider};
use super::types::{TransferRequest, TxReceipt};

/// Wallet provider speaking JSON-RPC to an EVM node.
///
/// Without a private key the node's unlocked accounts are used and the node
/// signs (`eth_sendTransaction`), as a development chain such as Ganache
/// does. With a private key the provider signs locally and exposes exactly
/// that one account.
pub struct RpcWalletProvider {
    provider: DynProvider,
    local_account: Option<Address>,
}

impl RpcWalletProvider {
    /// Connect to the node at `rpc_url`, optionally signing with `private_key_hex`.
    pub fn connect(rpc_url: &str, private_key_hex: Option<&str>) -> Result<Self, WalletError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| WalletError::InvalidRpcUrl(e.to_string()))?;

        match private_key_hex {
            Some(key) => {
                let signer = create_signer(key)?;
                let account = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                tracing::info!(%account, "Wallet provider signing with local key");
                Ok(Self {
                    provider,
                    local_account: Some(account),
                })
            }
            None => {
                let provider = ProviderBuilder::new().connect_http(url).erased();
                Ok(Self {
                    provider,
                    local_account: None,
                })
            }
        }
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let accounts = self.accounts().await?;
        if accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        Ok(accounts)
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        if let Some(account) = self.local_account {
            return Ok(vec![account]);
        }

        self.provider
            .get_accounts()
            .await
            .map_err(|e| WalletError::AccessDenied(e.to_string()))
    }

    async fn network_id(&self) -> Result<u64, WalletError> {
        self.provider
            .get_net_version()
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))
    }

    async fn send_transaction(&self, tx: TransferRequest) -> Result<TxReceipt, WalletError> {
        let mut request = TransactionRequest::default()
            .from(tx.from)
            .to(tx.to)
            .value(tx.value);

        if let Some(data) = tx.data {
            request = request.input(Bytes::from(data).into());
        }

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| WalletError::TransactionFailed(format!("Failed to send: {e}")))?;

        let receipt = pending.get_receipt().await.map_err(|e| {
            WalletError::TransactionFailed(format!("Failed to get receipt: {e}"))
        })?;

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        if !receipt.status() {
            return Err(WalletError::TransactionFailed(format!(
                "Transaction {tx_hash} reverted"
            )));
        }

        Ok(TxReceipt {
            tx_hash,
            block_number: receipt.block_number.unwrap_or(0),
            gas_used: receipt.gas_used as u64,
        })
    }
}

/// Create a signer from a hex-encoded private key (with or without `0x`).
pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, WalletError> {
    let trimmed = private_key_hex.trim();
    let key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let key_bytes =
        alloy::hex::decode(key).map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))
}
