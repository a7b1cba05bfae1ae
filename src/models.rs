// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the catalog record and the request and response data
//! structures used by the REST API. All types derive `Serialize`,
//! `Deserialize`, and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.
//!
//! ## Listing Format
//!
//! [`Listing`] serializes with camelCase keys (`imageUrl`, `isAuction`,
//! `endTime`, `lastBidder`) so that the stored catalog blob keeps the shape
//! browser clients already read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes). The value
/// is kept as given; checksum casing is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Listing Models
// =============================================================================

/// A catalog record representing an item for sale or auction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Price (or current highest bid) in wei, as a decimal string.
    pub price: String,
    /// Address that receives payment.
    pub seller: WalletAddress,
    /// Image location: remote URL or `data:` URL.
    pub image_url: String,
    /// Whether the item is sold by auction.
    pub is_auction: bool,
    /// Auction deadline in unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Address of the last accepted bidder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_bidder: Option<WalletAddress>,
}

impl Listing {
    /// An auction is open for bids only until its deadline.
    ///
    /// Auctions without a deadline are never active.
    pub fn is_auction_active(&self, now_unix: i64) -> bool {
        self.is_auction && self.end_time.is_some_and(|end| end > now_unix)
    }
}

/// A listing as served to clients, with its auction state worked out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    /// Whether the listing currently accepts bids.
    pub is_auction_active: bool,
}

impl ListingView {
    pub fn new(listing: Listing, now_unix: i64) -> Self {
        let is_auction_active = listing.is_auction_active(now_unix);
        Self {
            listing,
            is_auction_active,
        }
    }
}

/// Sale-type filter used when browsing the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SaleFilter {
    /// Every listing.
    #[default]
    All,
    /// Fixed-price listings only.
    Fixed,
    /// Auction listings only.
    Auction,
}

impl SaleFilter {
    pub fn matches(self, listing: &Listing) -> bool {
        match self {
            SaleFilter::All => true,
            SaleFilter::Fixed => !listing.is_auction,
            SaleFilter::Auction => listing.is_auction,
        }
    }
}

/// Query parameters for browsing listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListingQuery {
    /// `all` (default), `fixed` or `auction`.
    #[serde(default)]
    pub filter: SaleFilter,
}

/// How a new item is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    Fixed,
    Auction,
}

/// An uploaded image, stored inline as a `data:` URL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUpload {
    /// MIME type, e.g. `image/png`.
    pub media_type: String,
    /// Base64-encoded image bytes.
    pub data_base64: String,
}

/// Request to list a new item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    /// Item name.
    #[serde(default)]
    pub name: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Fixed price or auction.
    pub sale_type: SaleType,
    /// Fixed price in ETH (required for fixed sales).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Starting bid in ETH (required for auctions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_bid: Option<String>,
    /// Auction end date/time (required for auctions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Uploaded image; takes precedence over `image_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageUpload>,
    /// Remote image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Response after listing an item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingResponse {
    /// The stored listing.
    pub listing: Listing,
    /// Human-readable status line.
    pub message: String,
}

/// Request to bid on an auction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceBidRequest {
    /// Bid amount in ETH.
    pub amount: String,
}

/// What a purchase would transfer, shown before the user confirms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransferPreview {
    /// Sending account.
    pub from: WalletAddress,
    /// Receiving account.
    pub to: WalletAddress,
    /// Amount in wei.
    pub value_wei: String,
    /// Amount in ETH.
    pub value_eth: String,
    /// Confirmation text.
    pub message: String,
}

/// Result of a completed purchase, bid or contract call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionOutcome {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
    /// Human-readable status line.
    pub message: String,
    /// The listing after the operation (absent once purchased).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<Listing>,
}

/// Response after re-seeding the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResetResponse {
    /// Number of listings in the fresh catalog.
    pub count: usize,
}

// =============================================================================
// Wallet Session Models
// =============================================================================

/// Wallet connection status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct WalletStatusResponse {
    /// Whether an account is connected.
    pub connected: bool,
    /// Current account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<WalletAddress>,
    /// Network id reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    /// Display name of the network, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    /// Block explorer for the network, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}
