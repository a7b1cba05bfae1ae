// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to local storage.

pub mod listings;

pub use listings::{ListingRepository, PRODUCTS_STORAGE_KEY};
