// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Storage Module
//!
//! Persistent key/value storage modelled on browser `localStorage`. Each key
//! holds one string blob; the listing catalog is a single JSON array under
//! the `marketplace_products` key.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   local-storage/
//!     marketplace_products.json   # Listing catalog (JSON array)
//!     {key}.json                  # Any other key
//!   .health_check-<uuid>          # Transient, one per health check
//! ```
//!
//! ## Consistency
//!
//! - Blobs are replaced atomically (temp file + rename)
//! - There is no cross-process locking: concurrent writers sharing a data
//!   directory overwrite each other, last write wins

pub mod local_store;
pub mod paths;
pub mod repository;
pub mod seed;

pub use local_store::{LocalStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{ListingRepository, PRODUCTS_STORAGE_KEY};
