// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Purchases, bids and the demo contract calls.
//!
//! Payment is a plain value transfer from the buyer to the seller's address;
//! the catalog is only changed after the wallet reports success.

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use super::{stored_price, CatalogEvent, Market, MarketError, MarketResult};
use crate::blockchain::{
    format_ether, parse_ether, MarketplaceContext, TransferRequest, WalletError,
};
use crate::models::{Listing, TransactionOutcome, TransferPreview, WalletAddress};
use crate::storage::ListingRepository;

/// Deposit sent to the seller with every accepted bid.
pub const BID_DEPOSIT_ETH: &str = "0.01";

impl Market<'_> {
    /// Describe the transfer a purchase would make, for confirmation.
    pub async fn preview_purchase(
        &self,
        listing_id: &str,
        buyer: Option<Address>,
    ) -> MarketResult<TransferPreview> {
        let buyer = buyer.ok_or(MarketError::WalletNotConnected)?;
        let listing = self.get(listing_id).await?;
        let (seller, value) = fixed_price_terms(&listing)?;
        let value_eth = format_ether(value);

        Ok(TransferPreview {
            from: WalletAddress(buyer.to_string()),
            to: WalletAddress(seller.to_string()),
            value_wei: value.to_string(),
            message: format!(
                "This will send {value_eth} ETH from your account to {}. Continue?",
                listing.seller
            ),
            value_eth,
        })
    }

    /// Pay the seller the full price and remove the listing.
    ///
    /// The storage lock is not held while the wallet confirms the payment;
    /// the listing is looked up again before it is removed.
    pub async fn purchase(
        &self,
        listing_id: &str,
        buyer: Option<Address>,
    ) -> MarketResult<TransactionOutcome> {
        let buyer = buyer.ok_or(MarketError::WalletNotConnected)?;
        let wallet = self.wallet()?;

        let listing = self.get(listing_id).await?;
        let (seller, value) = fixed_price_terms(&listing)?;

        tracing::info!(
            listing_id,
            %buyer,
            %seller,
            value_wei = %value,
            "Sending purchase payment"
        );
        let receipt = wallet
            .send_transaction(TransferRequest::value_transfer(buyer, seller, value))
            .await
            .inspect_err(|e| tracing::warn!(listing_id, error = %e, "Purchase payment failed"))?;

        {
            let storage = self.storage.write().await;
            if !ListingRepository::new(&storage).remove(listing_id)? {
                tracing::warn!(
                    listing_id,
                    tx_hash = %receipt.tx_hash,
                    "Listing vanished while the payment was pending"
                );
                return Err(MarketError::ListingChanged(listing_id.to_string()));
            }
        }

        self.events.publish(CatalogEvent::Removed {
            listing_id: listing_id.to_string(),
        });

        Ok(TransactionOutcome {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            message: format!("Successfully purchased {}!", listing.name),
            listing: None,
        })
    }

    /// Outbid the current price on an open auction.
    ///
    /// The bid itself is not escrowed; a fixed deposit goes to the seller and
    /// the listing records the new price and bidder. The bid is checked again
    /// against the stored price once the deposit is confirmed.
    pub async fn place_bid(
        &self,
        listing_id: &str,
        bidder: Option<Address>,
        amount: &str,
        now_unix: i64,
    ) -> MarketResult<TransactionOutcome> {
        let bidder = bidder.ok_or(MarketError::WalletNotConnected)?;
        let wallet = self.wallet()?;
        let bid_wei = parse_ether(amount)?;

        let listing = self.get(listing_id).await?;
        if !listing.is_auction {
            return Err(MarketError::NotAuction(listing.id));
        }
        if !listing.is_auction_active(now_unix) {
            return Err(MarketError::AuctionEnded(listing.id));
        }
        if bid_wei <= stored_price(&listing)? {
            return Err(MarketError::BidTooLow);
        }

        let seller = seller_address(&listing)?;
        let deposit = parse_ether(BID_DEPOSIT_ETH)?;
        let receipt = wallet
            .send_transaction(TransferRequest::value_transfer(bidder, seller, deposit))
            .await
            .inspect_err(|e| tracing::warn!(listing_id, error = %e, "Bid deposit failed"))?;

        let listing = {
            let storage = self.storage.write().await;
            let repo = ListingRepository::new(&storage);
            let mut current = match repo.get(listing_id)? {
                Some(current) if bid_wei > stored_price(&current)? => current,
                _ => {
                    tracing::warn!(
                        listing_id,
                        tx_hash = %receipt.tx_hash,
                        "Listing changed while the bid deposit was pending"
                    );
                    return Err(MarketError::ListingChanged(listing_id.to_string()));
                }
            };
            current.price = bid_wei.to_string();
            current.last_bidder = Some(WalletAddress(bidder.to_string()));
            repo.update(&current)?;
            current
        };

        tracing::info!(listing_id, %bidder, bid_wei = %bid_wei, "Bid accepted");
        self.events.publish(CatalogEvent::Updated {
            listing: listing.clone(),
        });

        Ok(TransactionOutcome {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            message: format!(
                "Successfully placed bid of {} ETH on {}!",
                format_ether(bid_wei),
                listing.name
            ),
            listing: Some(listing),
        })
    }

    /// Call `buy()` on the deployed contract, paying the demo price.
    pub async fn contract_buy(&self, account: Option<Address>) -> MarketResult<TransactionOutcome> {
        let (context, from) = self.contract_context(account).await?;
        let request = context.buy_request(from)?;
        self.contract_call(request, "Bought for 0.1 ETH!").await
    }

    /// Call `faucet()` on the deployed contract.
    pub async fn contract_faucet(
        &self,
        account: Option<Address>,
    ) -> MarketResult<TransactionOutcome> {
        let (context, from) = self.contract_context(account).await?;
        self.contract_call(context.faucet_request(from), "Received 1 ETH!")
            .await
    }

    async fn contract_context(
        &self,
        account: Option<Address>,
    ) -> MarketResult<(MarketplaceContext, Address)> {
        let account = account.ok_or(MarketError::WalletNotConnected)?;
        let context = MarketplaceContext::resolve(self.wallet()?, self.artifact).await?;
        Ok((context, account))
    }

    async fn contract_call(
        &self,
        request: TransferRequest,
        message: &str,
    ) -> MarketResult<TransactionOutcome> {
        let receipt = self.wallet()?.send_transaction(request).await?;
        tracing::info!(tx_hash = %receipt.tx_hash, "{message}");

        Ok(TransactionOutcome {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            message: message.to_string(),
            listing: None,
        })
    }
}

fn fixed_price_terms(listing: &Listing) -> MarketResult<(Address, U256)> {
    if listing.is_auction {
        return Err(MarketError::NotFixedPrice(listing.id.clone()));
    }
    Ok((seller_address(listing)?, stored_price(listing)?))
}

fn seller_address(listing: &Listing) -> Result<Address, WalletError> {
    Address::from_str(listing.seller.as_str())
        .map_err(|e| WalletError::InvalidAddress(format!("{}: {e}", listing.seller)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::testing::MockWallet;
    use crate::blockchain::MarketplaceArtifact;
    use crate::market::tests::{test_storage, ARTIFACT};
    use crate::market::CatalogEvents;
    use crate::blockchain::{TxReceipt, WalletProvider};
    use crate::models::SaleFilter;
    use crate::storage::LocalStorage;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::RwLock;

    // Seed ids: "2" is a fixed-price laptop (2 ETH), "3" an auctioned necklace (1 ETH).
    const LAPTOP: &str = "2";
    const NECKLACE: &str = "3";

    fn now_unix() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[tokio::test]
    async fn preview_describes_transfer() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);

        let preview = market
            .preview_purchase(LAPTOP, Some(wallet.accounts[0]))
            .await
            .unwrap();
        assert_eq!(preview.value_eth, "2");
        assert_eq!(preview.value_wei, "2000000000000000000");
        assert_eq!(
            preview.message,
            "This will send 2 ETH from your account to \
             0x22d491Bde2303f2f43325b2108D26f1eAbA1e32b. Continue?"
        );
        assert!(wallet.sent().is_empty());
    }

    #[tokio::test]
    async fn purchase_requires_connected_wallet() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);

        let err = market.purchase(LAPTOP, None).await.unwrap_err();
        assert!(matches!(err, MarketError::WalletNotConnected));
        assert_eq!(err.to_string(), "Please connect your wallet first!");
    }

    #[tokio::test]
    async fn purchase_pays_seller_and_removes_listing() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let mut rx = events.subscribe();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let buyer = wallet.accounts[0];

        let outcome = market.purchase(LAPTOP, Some(buyer)).await.unwrap();
        assert_eq!(outcome.message, "Successfully purchased Gaming Laptop!");

        let sent = wallet.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, buyer);
        assert_eq!(
            sent[0].to,
            Address::from_str("0x22d491bde2303f2f43325b2108d26f1eaba1e32b").unwrap()
        );
        assert_eq!(sent[0].value, parse_ether("2").unwrap());
        assert!(sent[0].data.is_none());

        assert!(matches!(
            market.get(LAPTOP).await,
            Err(MarketError::NotFound(_))
        ));
        assert_eq!(
            rx.recv().await.unwrap(),
            CatalogEvent::Removed {
                listing_id: LAPTOP.to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_payment_leaves_listing_in_place() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        wallet.fail_sends();
        let market = Market::new(&storage, Some(&wallet), None, &events);

        let err = market
            .purchase(LAPTOP, Some(wallet.accounts[0]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::Wallet(WalletError::TransactionFailed(_))
        ));
        assert!(market.get(LAPTOP).await.is_ok());
        assert_eq!(market.browse(SaleFilter::All).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn auctions_cannot_be_bought_outright() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);

        assert!(matches!(
            market.purchase(NECKLACE, Some(wallet.accounts[0])).await,
            Err(MarketError::NotFixedPrice(_))
        ));
        assert!(matches!(
            market.purchase("missing", Some(wallet.accounts[0])).await,
            Err(MarketError::NotFound(_))
        ));
        assert!(wallet.sent().is_empty());
    }

    #[tokio::test]
    async fn bid_updates_price_and_sends_deposit() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let bidder = wallet.accounts[1];

        let outcome = market
            .place_bid(NECKLACE, Some(bidder), "1.5", now_unix())
            .await
            .unwrap();
        assert_eq!(
            outcome.message,
            "Successfully placed bid of 1.5 ETH on Diamond Necklace!"
        );

        let updated = market.get(NECKLACE).await.unwrap();
        assert_eq!(updated.price, "1500000000000000000");
        assert_eq!(updated.last_bidder, Some(WalletAddress(bidder.to_string())));
        assert_eq!(outcome.listing, Some(updated));

        let sent = wallet.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, bidder);
        assert_eq!(sent[0].value, parse_ether(BID_DEPOSIT_ETH).unwrap());
    }

    #[tokio::test]
    async fn bid_must_exceed_current_price() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let bidder = Some(wallet.accounts[0]);

        for amount in ["1", "0.5"] {
            let err = market
                .place_bid(NECKLACE, bidder, amount, now_unix())
                .await
                .unwrap_err();
            assert!(matches!(err, MarketError::BidTooLow));
        }
        assert!(wallet.sent().is_empty());
        assert_eq!(
            market.get(NECKLACE).await.unwrap().price,
            "1000000000000000000"
        );
    }

    #[tokio::test]
    async fn bid_rejected_on_fixed_price_or_ended_auction() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let bidder = Some(wallet.accounts[0]);

        assert!(matches!(
            market.place_bid(LAPTOP, bidder, "5", now_unix()).await,
            Err(MarketError::NotAuction(_))
        ));

        let after_close = now_unix() + 3600;
        assert!(matches!(
            market.place_bid(NECKLACE, bidder, "5", after_close).await,
            Err(MarketError::AuctionEnded(_))
        ));

        assert!(matches!(
            market.place_bid(NECKLACE, None, "5", now_unix()).await,
            Err(MarketError::WalletNotConnected)
        ));
        assert!(wallet.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_deposit_keeps_previous_bid() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        wallet.fail_sends();
        let market = Market::new(&storage, Some(&wallet), None, &events);

        assert!(market
            .place_bid(NECKLACE, Some(wallet.accounts[0]), "2", now_unix())
            .await
            .is_err());
        let listing = market.get(NECKLACE).await.unwrap();
        assert_eq!(listing.price, "1000000000000000000");
        assert_eq!(listing.last_bidder, None);
    }

    #[tokio::test]
    async fn contract_demo_calls_hit_deployed_contract() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let artifact = MarketplaceArtifact::from_json(ARTIFACT).unwrap();
        let market = Market::new(&storage, Some(&wallet), Some(&artifact), &events);
        let account = Some(wallet.accounts[0]);

        let bought = market.contract_buy(account).await.unwrap();
        assert_eq!(bought.message, "Bought for 0.1 ETH!");
        let faucet = market.contract_faucet(account).await.unwrap();
        assert_eq!(faucet.message, "Received 1 ETH!");

        let contract = Address::repeat_byte(0x11);
        let sent = wallet.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|tx| tx.to == contract && tx.data.is_some()));
        assert_eq!(sent[0].value, parse_ether("0.1").unwrap());
        assert_eq!(sent[1].value, U256::ZERO);
    }

    /// Wallet whose transactions never confirm.
    struct PendingWallet(MockWallet);

    #[async_trait]
    impl WalletProvider for PendingWallet {
        async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.0.request_accounts().await
        }

        async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.0.accounts().await
        }

        async fn network_id(&self) -> Result<u64, WalletError> {
            self.0.network_id().await
        }

        async fn send_transaction(&self, _tx: TransferRequest) -> Result<TxReceipt, WalletError> {
            std::future::pending().await
        }
    }

    /// Wallet that edits the catalog while a transaction is in flight.
    struct InterleavedWallet<'a, F> {
        inner: MockWallet,
        storage: &'a RwLock<LocalStorage>,
        during_send: F,
    }

    fn interleaved<F>(storage: &RwLock<LocalStorage>, during_send: F) -> InterleavedWallet<'_, F>
    where
        F: Fn(&ListingRepository<'_>) + Send + Sync,
    {
        InterleavedWallet {
            inner: MockWallet::new(5777),
            storage,
            during_send,
        }
    }

    #[async_trait]
    impl<F> WalletProvider for InterleavedWallet<'_, F>
    where
        F: Fn(&ListingRepository<'_>) + Send + Sync,
    {
        async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.inner.request_accounts().await
        }

        async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.inner.accounts().await
        }

        async fn network_id(&self) -> Result<u64, WalletError> {
            self.inner.network_id().await
        }

        async fn send_transaction(&self, tx: TransferRequest) -> Result<TxReceipt, WalletError> {
            {
                let storage = tokio::time::timeout(Duration::from_secs(2), self.storage.write())
                    .await
                    .expect("catalog stayed locked during the transaction");
                (self.during_send)(&ListingRepository::new(&storage));
            }
            self.inner.send_transaction(tx).await
        }
    }

    #[tokio::test]
    async fn pending_payment_does_not_block_catalog() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = PendingWallet(MockWallet::new(5777));
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let buyer = wallet.0.accounts[0];

        let purchase = market.purchase(LAPTOP, Some(buyer));
        tokio::pin!(purchase);
        assert!(tokio::time::timeout(Duration::from_millis(50), &mut purchase)
            .await
            .is_err());

        let listings = tokio::time::timeout(Duration::from_secs(2), market.browse(SaleFilter::All))
            .await
            .expect("browse blocked by pending purchase")
            .unwrap();
        assert_eq!(listings.len(), 6);
        assert!(tokio::time::timeout(Duration::from_secs(2), storage.write())
            .await
            .is_ok());

        let bid = market.place_bid(NECKLACE, Some(buyer), "5", now_unix());
        tokio::pin!(bid);
        assert!(tokio::time::timeout(Duration::from_millis(50), &mut bid)
            .await
            .is_err());
        assert!(tokio::time::timeout(Duration::from_secs(2), market.get(NECKLACE))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn purchase_of_listing_removed_mid_payment_is_reported() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = interleaved(&storage, |repo| {
            assert!(repo.remove(LAPTOP).unwrap());
        });
        let market = Market::new(&storage, Some(&wallet), None, &events);
        let mut rx = events.subscribe();

        let err = market
            .purchase(LAPTOP, Some(wallet.inner.accounts[0]))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::ListingChanged(ref id) if id == LAPTOP));
        assert_eq!(wallet.inner.sent().len(), 1);
        assert_eq!(market.browse(SaleFilter::All).await.unwrap().len(), 5);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn bid_outpaced_mid_deposit_keeps_higher_price() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = interleaved(&storage, |repo| {
            let mut listing = repo.get(NECKLACE).unwrap().unwrap();
            listing.price = parse_ether("3").unwrap().to_string();
            assert!(repo.update(&listing).unwrap());
        });
        let market = Market::new(&storage, Some(&wallet), None, &events);

        let err = market
            .place_bid(NECKLACE, Some(wallet.inner.accounts[1]), "1.5", now_unix())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::ListingChanged(_)));

        let listing = market.get(NECKLACE).await.unwrap();
        assert_eq!(listing.price, "3000000000000000000");
        assert_eq!(listing.last_bidder, None);
    }

    #[tokio::test]
    async fn outcome_reports_gas_used() {
        let (_dir, storage) = test_storage();
        let events = CatalogEvents::default();
        let wallet = MockWallet::new(5777);
        let market = Market::new(&storage, Some(&wallet), None, &events);

        let outcome = market
            .purchase(LAPTOP, Some(wallet.accounts[0]))
            .await
            .unwrap();
        assert_eq!(outcome.gas_used, 21_000);
        assert_eq!(outcome.block_number, 1);
    }
}
