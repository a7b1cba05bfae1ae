// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Listings written to an empty catalog.
//!
//! Seller addresses are the first accounts of a default Ganache workspace.

use crate::models::{Listing, WalletAddress};

/// Seconds until the "Diamond Necklace" auction closes after seeding.
const NECKLACE_AUCTION_SECS: i64 = 600;
/// Seconds until the "Antique Vase" auction closes after seeding.
const VASE_AUCTION_SECS: i64 = 300;

struct SeedItem {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_wei: &'static str,
    seller: &'static str,
    image_url: &'static str,
    auction_secs: Option<i64>,
}

const SEED_ITEMS: [SeedItem; 6] = [
    SeedItem {
        id: "1",
        name: "Vintage Watch",
        description: "A beautiful vintage timepiece with leather strap and gold accents.",
        price_wei: "500000000000000000",
        seller: "0xFFcf8FDEE72ac11b5c542428B35EEF5769C409f0",
        image_url: "https://images.unsplash.com/photo-1651735060244-781017915251?q=80&w=2940&auto=format&fit=crop",
        auction_secs: None,
    },
    SeedItem {
        id: "2",
        name: "Gaming Laptop",
        description: "High-performance gaming laptop with RGB keyboard and powerful graphics.",
        price_wei: "2000000000000000000",
        seller: "0x22d491Bde2303f2f43325b2108D26f1eAbA1e32b",
        image_url: "https://images.unsplash.com/photo-1605134513573-384dcf99a44c?q=80&w=2940&auto=format&fit=crop",
        auction_secs: None,
    },
    SeedItem {
        id: "3",
        name: "Diamond Necklace",
        description: "Elegant diamond necklace with 24K gold chain.",
        price_wei: "1000000000000000000",
        seller: "0xd03ea8624C8C5987235048901fB614fDcA89b117",
        image_url: "https://images.unsplash.com/photo-1589128777073-263566ae5e4d?q=80&w=3087&auto=format&fit=crop",
        auction_secs: Some(NECKLACE_AUCTION_SECS),
    },
    SeedItem {
        id: "4",
        name: "Antique Vase",
        description: "Hand-painted ceramic vase from the 18th century.",
        price_wei: "300000000000000000",
        seller: "0x3E5e9111Ae8eB78Fe1CC3bb8915d5D461F3Ef9A9",
        image_url: "https://images.unsplash.com/photo-1723544541566-175e43e5af31?q=80&w=3072&auto=format&fit=crop",
        auction_secs: Some(VASE_AUCTION_SECS),
    },
    SeedItem {
        id: "5",
        name: "Electric Guitar",
        description: "Professional electric guitar with amp and accessories.",
        price_wei: "800000000000000000",
        seller: "0xACa94ef8bD5ffEE41947b4585a84BdA5a3d3DA6E",
        image_url: "https://images.unsplash.com/photo-1568193755668-aae18714a9f1?q=80&w=2912&auto=format&fit=crop",
        auction_secs: None,
    },
    SeedItem {
        id: "6",
        name: "Mountain Bike",
        description: "Premium mountain bike with carbon fiber frame and hydraulic brakes.",
        price_wei: "1500000000000000000",
        seller: "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1",
        image_url: "https://images.unsplash.com/photo-1485965120184-e220f721d03e?q=80&w=2940&auto=format&fit=crop",
        auction_secs: None,
    },
];

/// Build the seed catalog with auction deadlines relative to `now_unix`.
pub fn seed_listings(now_unix: i64) -> Vec<Listing> {
    SEED_ITEMS
        .iter()
        .map(|item| Listing {
            id: item.id.to_string(),
            name: item.name.to_string(),
            description: item.description.to_string(),
            price: item.price_wei.to_string(),
            seller: WalletAddress::from(item.seller),
            image_url: item.image_url.to_string(),
            is_auction: item.auction_secs.is_some(),
            end_time: item.auction_secs.map(|secs| now_unix + secs),
            last_bidder: None,
        })
        .collect()
}
