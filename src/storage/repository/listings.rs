// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Listing catalog repository.
//!
//! The whole catalog is one JSON array stored under [`PRODUCTS_STORAGE_KEY`].
//! Every mutation reads the array, edits it and writes it back in full; the
//! last writer wins.

use chrono::Utc;

use super::super::{seed::seed_listings, LocalStorage, StorageResult};
use crate::models::{Listing, SaleFilter};

/// Storage key holding the catalog blob.
pub const PRODUCTS_STORAGE_KEY: &str = "marketplace_products";

/// Repository for catalog operations on local storage.
pub struct ListingRepository<'a> {
    storage: &'a LocalStorage,
}

impl<'a> ListingRepository<'a> {
    /// Create a new ListingRepository.
    pub fn new(storage: &'a LocalStorage) -> Self {
        Self { storage }
    }

    /// Write the seed catalog when none is stored, or always when `force_reset`.
    ///
    /// Returns `true` if the seed was written.
    pub fn initialize(&self, force_reset: bool) -> StorageResult<bool> {
        if !force_reset && self.storage.contains(PRODUCTS_STORAGE_KEY)? {
            return Ok(false);
        }

        let seed = seed_listings(Utc::now().timestamp());
        self.save(&seed)?;
        tracing::info!(count = seed.len(), force_reset, "Seeded listing catalog");
        Ok(true)
    }

    /// Read the catalog, seeding it first if nothing is stored.
    pub fn list_all(&self) -> StorageResult<Vec<Listing>> {
        if let Some(listings) = self.storage.read_json(PRODUCTS_STORAGE_KEY)? {
            return Ok(listings);
        }

        self.initialize(false)?;
        Ok(self
            .storage
            .read_json(PRODUCTS_STORAGE_KEY)?
            .unwrap_or_default())
    }

    /// Read the catalog filtered by sale type.
    pub fn list(&self, filter: SaleFilter) -> StorageResult<Vec<Listing>> {
        let mut listings = self.list_all()?;
        listings.retain(|listing| filter.matches(listing));
        Ok(listings)
    }

    /// Get a listing by ID.
    pub fn get(&self, listing_id: &str) -> StorageResult<Option<Listing>> {
        Ok(self
            .list_all()?
            .into_iter()
            .find(|listing| listing.id == listing_id))
    }

    /// Append a listing. The caller supplies the id; duplicates are not checked.
    pub fn add(&self, listing: Listing) -> StorageResult<Listing> {
        let mut listings = self.list_all()?;
        listings.push(listing.clone());
        self.save(&listings)?;
        Ok(listing)
    }

    /// Remove every listing with `listing_id`.
    ///
    /// Returns `false`, leaving the catalog untouched, when none matched.
    pub fn remove(&self, listing_id: &str) -> StorageResult<bool> {
        let listings = self.list_all()?;
        let before = listings.len();
        let remaining: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| listing.id != listing_id)
            .collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.save(&remaining)?;
        Ok(true)
    }

    /// Replace the first listing whose id matches `listing.id`.
    ///
    /// Returns `false` and writes nothing when no listing matches.
    pub fn update(&self, listing: &Listing) -> StorageResult<bool> {
        let mut listings = self.list_all()?;
        let Some(slot) = listings.iter_mut().find(|l| l.id == listing.id) else {
            return Ok(false);
        };

        *slot = listing.clone();
        self.save(&listings)?;
        Ok(true)
    }

    fn save(&self, listings: &[Listing]) -> StorageResult<()> {
        self.storage.write_json(PRODUCTS_STORAGE_KEY, &listings)
    }
}
