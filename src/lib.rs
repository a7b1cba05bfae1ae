// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BlockBay - Marketplace Server
//!
//! Fixed-price and auction listings kept in a local JSON catalog, with
//! purchases and bids paid as value transfers through an EVM wallet.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Wallet provider, ETH units and the marketplace contract
//! - `market` - Listing, purchase and bid flows plus catalog change events
//! - `session` - Wallet connection state
//! - `storage` - Key/value local storage and the listing catalog

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
