// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Marketplace flows.
//!
//! Each operation joins the catalog, the wallet provider and the event
//! channel the way the storefront pages do:
//!
//! - browse, view and re-seed the catalog
//! - list a new fixed-price item or auction
//! - buy a fixed-price item (value transfer to the seller, then remove)
//! - bid on an auction (deposit to the seller, then raise the price)
//! - call the demo `buy` / `faucet` contract functions
//!
//! Catalog writes take the storage write lock only around the storage
//! access. Wallet transactions run unlocked and the listing is checked
//! again before the catalog is changed.

mod error;
pub mod events;
mod trade;

pub use error::{MarketError, MarketResult};
pub use events::{CatalogEvent, CatalogEvents};
pub use trade::BID_DEPOSIT_ETH;

use alloy::primitives::U256;
use base64ct::{Base64, Encoding};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::blockchain::{
    format_ether, parse_ether, MarketplaceArtifact, MarketplaceContext, WalletError,
    WalletProvider,
};
use crate::models::{
    CreateListingRequest, CreateListingResponse, ImageUpload, Listing, SaleFilter, SaleType,
    WalletAddress,
};
use crate::storage::{ListingRepository, LocalStorage, PRODUCTS_STORAGE_KEY};

/// Borrowed view of everything a marketplace operation needs.
pub struct Market<'a> {
    storage: &'a RwLock<LocalStorage>,
    wallet: Option<&'a dyn WalletProvider>,
    artifact: Option<&'a MarketplaceArtifact>,
    events: &'a CatalogEvents,
}

impl<'a> Market<'a> {
    pub fn new(
        storage: &'a RwLock<LocalStorage>,
        wallet: Option<&'a dyn WalletProvider>,
        artifact: Option<&'a MarketplaceArtifact>,
        events: &'a CatalogEvents,
    ) -> Self {
        Self {
            storage,
            wallet,
            artifact,
            events,
        }
    }

    /// Listings matching `filter`, in catalog order.
    pub async fn browse(&self, filter: SaleFilter) -> MarketResult<Vec<Listing>> {
        self.ensure_seeded().await?;
        let storage = self.storage.read().await;
        Ok(ListingRepository::new(&storage).list(filter)?)
    }

    pub async fn get(&self, listing_id: &str) -> MarketResult<Listing> {
        self.ensure_seeded().await?;
        let storage = self.storage.read().await;
        ListingRepository::new(&storage)
            .get(listing_id)?
            .ok_or_else(|| MarketError::NotFound(listing_id.to_string()))
    }

    /// Overwrite the catalog with the seed listings.
    pub async fn reset_catalog(&self) -> MarketResult<usize> {
        let storage = self.storage.write().await;
        let repo = ListingRepository::new(&storage);
        repo.initialize(true)?;
        let count = repo.list_all()?.len();

        self.events.publish(CatalogEvent::Initialized { count });
        Ok(count)
    }

    /// List a new item sold by the wallet's first account.
    pub async fn list_item(
        &self,
        request: CreateListingRequest,
        now: DateTime<Utc>,
    ) -> MarketResult<CreateListingResponse> {
        let name = request.name.trim();
        let description = request.description.trim();
        if name.is_empty() {
            return Err(MarketError::Validation("Item name is required".to_string()));
        }
        if description.is_empty() {
            return Err(MarketError::Validation(
                "Item description is required".to_string(),
            ));
        }

        let (amount, end_time) = match request.sale_type {
            SaleType::Fixed => {
                let price = required(request.price.as_deref(), "Price is required")?;
                (price, None)
            }
            SaleType::Auction => {
                let bid = required(request.starting_bid.as_deref(), "Starting bid is required")?;
                let end = request.end_time.ok_or_else(|| {
                    MarketError::Validation("Auction end time is required".to_string())
                })?;
                if end <= now {
                    return Err(MarketError::Validation(
                        "Auction end time must be in the future".to_string(),
                    ));
                }
                (bid, Some(end))
            }
        };
        let price_wei = parse_ether(amount)?;

        let image_url = match &request.image {
            Some(upload) => image_data_url(upload)?,
            None => request
                .image_url
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        };

        let wallet = self.wallet()?;
        let context = MarketplaceContext::resolve(wallet, self.artifact).await?;
        let seller = context.account()?;

        let listing = Listing {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: price_wei.to_string(),
            seller: WalletAddress(seller.to_string()),
            image_url,
            is_auction: request.sale_type == SaleType::Auction,
            end_time: end_time.map(|end| end.timestamp()),
            last_bidder: None,
        };

        let listing = {
            let storage = self.storage.write().await;
            ListingRepository::new(&storage).add(listing)?
        };
        tracing::info!(
            listing_id = %listing.id,
            seller = %listing.seller,
            is_auction = listing.is_auction,
            "Listing created"
        );
        self.events.publish(CatalogEvent::Added {
            listing: listing.clone(),
        });

        let message = match end_time {
            None => format!(
                "Item \"{}\" listed for {} ETH.",
                listing.name,
                format_ether(price_wei)
            ),
            Some(end) => format!(
                "Auction for \"{}\" listed (ends at {})",
                listing.name,
                end.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        };

        Ok(CreateListingResponse { listing, message })
    }

    /// Seed a missing catalog under the write lock so readers never write.
    async fn ensure_seeded(&self) -> MarketResult<()> {
        if self.storage.read().await.contains(PRODUCTS_STORAGE_KEY)? {
            return Ok(());
        }

        let storage = self.storage.write().await;
        if ListingRepository::new(&storage).initialize(false)? {
            let count = ListingRepository::new(&storage).list_all()?.len();
            drop(storage);
            self.events.publish(CatalogEvent::Initialized { count });
        }
        Ok(())
    }

    fn wallet(&self) -> Result<&'a dyn WalletProvider, WalletError> {
        self.wallet.ok_or(WalletError::NotDetected)
    }
}

fn required<'r>(value: Option<&'r str>, message: &str) -> MarketResult<&'r str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MarketError::Validation(message.to_string()))
}

/// Inline an uploaded image as a `data:` URL.
fn image_data_url(upload: &ImageUpload) -> MarketResult<String> {
    if !upload.media_type.starts_with("image/") {
        return Err(MarketError::Validation(format!(
            "Unsupported image type: {}",
            upload.media_type
        )));
    }

    let data = upload.data_base64.trim();
    Base64::decode_vec(data)
        .map_err(|_| MarketError::Validation("Image data is not valid base64".to_string()))?;

    Ok(format!("data:{};base64,{}", upload.media_type, data))
}

/// Stored wei amount of a listing.
fn stored_price(listing: &Listing) -> MarketResult<U256> {
    U256::from_str_radix(&listing.price, 10)
        .map_err(|_| MarketError::InvalidStoredPrice(listing.id.clone()))
}
