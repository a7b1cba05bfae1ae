// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory wallet provider for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use alloy::primitives::Address;
use async_trait::async_trait;

use super::provider::{WalletError, WalletProvider};
use super::types::{TransferRequest, TxReceipt};

/// Wallet that records every transaction instead of sending it.
pub struct MockWallet {
    pub accounts: Vec<Address>,
    pub network_id: u64,
    sent: Mutex<Vec<TransferRequest>>,
    fail_sends: AtomicBool,
    next_block: AtomicU64,
}

impl MockWallet {
    /// Two deterministic accounts on `network_id`.
    pub fn new(network_id: u64) -> Self {
        Self::with_accounts(
            network_id,
            vec![Address::repeat_byte(0xaa), Address::repeat_byte(0xbb)],
        )
    }

    pub fn with_accounts(network_id: u64, accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            network_id,
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
            next_block: AtomicU64::new(1),
        }
    }

    /// Make every following `send_transaction` fail as a rejected transaction.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<TransferRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        Ok(self.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn network_id(&self) -> Result<u64, WalletError> {
        Ok(self.network_id)
    }

    async fn send_transaction(&self, tx: TransferRequest) -> Result<TxReceipt, WalletError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(WalletError::TransactionFailed(
                "User denied transaction signature".to_string(),
            ));
        }

        let block_number = self.next_block.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(tx);

        Ok(TxReceipt {
            tx_hash: format!("0x{block_number:064x}"),
            block_number,
            gas_used: 21_000,
        })
    }
}
