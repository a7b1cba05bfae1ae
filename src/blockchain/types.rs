// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{Address, U256};

/// Network configuration for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Network id as reported by `net_version`
    pub network_id: u64,
    /// Block explorer URL, when the network has one
    pub explorer_url: Option<&'static str>,
}

/// Ganache workspace (GUI default network id).
pub const GANACHE_WORKSPACE: NetworkConfig = NetworkConfig {
    name: "Ganache",
    network_id: 5777,
    explorer_url: None,
};

/// Ganache CLI / local development chain.
pub const LOCAL_DEV: NetworkConfig = NetworkConfig {
    name: "Local Development",
    network_id: 1337,
    explorer_url: None,
};

/// Sepolia testnet.
pub const SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Sepolia",
    network_id: 11155111,
    explorer_url: Some("https://sepolia.etherscan.io"),
};

/// Ethereum mainnet.
pub const ETHEREUM_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum Mainnet",
    network_id: 1,
    explorer_url: Some("https://etherscan.io"),
};

const KNOWN_NETWORKS: [NetworkConfig; 4] =
    [GANACHE_WORKSPACE, LOCAL_DEV, SEPOLIA, ETHEREUM_MAINNET];

/// Look up a known network by id.
pub fn known_network(network_id: u64) -> Option<&'static NetworkConfig> {
    KNOWN_NETWORKS
        .iter()
        .find(|network| network.network_id == network_id)
}

/// A transaction submitted through the wallet provider.
///
/// Without `data` this is a plain value transfer; with `data` it is a
/// contract call carrying ABI-encoded calldata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Sending account
    pub from: Address,
    /// Recipient (account or contract)
    pub to: Address,
    /// Amount in wei
    pub value: U256,
    /// Calldata for contract calls
    pub data: Option<Vec<u8>>,
}

impl TransferRequest {
    /// Plain value transfer between two accounts.
    pub fn value_transfer(from: Address, to: Address, value: U256) -> Self {
        Self {
            from,
            to,
            value,
            data: None,
        }
    }
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_networks_resolve_by_id() {
        assert_eq!(known_network(5777).map(|n| n.name), Some("Ganache"));
        assert_eq!(known_network(1337).map(|n| n.name), Some("Local Development"));
        assert_eq!(known_network(11155111).map(|n| n.name), Some("Sepolia"));
        assert!(known_network(42).is_none());
    }

    #[test]
    fn value_transfer_has_no_calldata() {
        let tx = TransferRequest::value_transfer(Address::ZERO, Address::ZERO, U256::from(5u64));
        assert!(tx.data.is_none());
        assert_eq!(tx.value, U256::from(5u64));
    }
}
