// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::blockchain::{MarketplaceArtifact, WalletProvider};
use crate::market::{CatalogEvents, Market};
use crate::session::WalletSession;
use crate::storage::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<RwLock<LocalStorage>>,
    /// `None` when no wallet provider is configured.
    pub wallet: Option<Arc<dyn WalletProvider>>,
    /// `None` when the contract artifact could not be loaded.
    pub artifact: Option<Arc<MarketplaceArtifact>>,
    pub session: Arc<RwLock<WalletSession>>,
    pub events: CatalogEvents,
}

impl AppState {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
            wallet: None,
            artifact: None,
            session: Arc::new(RwLock::new(WalletSession::default())),
            events: CatalogEvents::default(),
        }
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_artifact(mut self, artifact: MarketplaceArtifact) -> Self {
        self.artifact = Some(Arc::new(artifact));
        self
    }

    /// Marketplace operations over this state.
    pub fn market(&self) -> Market<'_> {
        Market::new(
            &self.storage,
            self.wallet.as_deref(),
            self.artifact.as_deref(),
            &self.events,
        )
    }

    /// Account of the connected session, if any.
    pub async fn current_account(&self) -> Option<alloy::primitives::Address> {
        self.session.read().await.account()
    }
}
