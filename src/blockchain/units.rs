// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between ETH amounts and wei.

use alloy::primitives::U256;

/// Decimals of the native token.
pub const ETHER_DECIMALS: u8 = 18;

/// Errors raised while parsing an amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount format: {0:?}")]
    InvalidFormat(String),

    #[error("too many decimal places (max {max})")]
    TooManyDecimals { max: u8 },

    #[error("amount overflow")]
    Overflow,
}

/// Parse a human-readable ETH amount (e.g. `"1.5"`) into wei.
pub fn parse_ether(amount: &str) -> Result<U256, UnitsError> {
    parse_units(amount, ETHER_DECIMALS)
}

/// Format wei as a human-readable ETH amount with trailing zeros removed.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parse a decimal string into the token's smallest unit.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let valid = is_digits(whole)
        && fraction.is_none_or(|f| !f.is_empty() && is_digits(f))
        && !(whole.is_empty() && fraction.is_none());
    if !valid {
        return Err(UnitsError::InvalidFormat(amount.to_string()));
    }

    let fraction = fraction.unwrap_or("");
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals { max: decimals });
    }

    let whole_value = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| UnitsError::Overflow)?
    };

    let padded = format!("{fraction:0<width$}", width = decimals as usize);
    let fraction_value = if padded.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&padded, 10).map_err(|_| UnitsError::Overflow)?
    };

    let multiplier = U256::from(10u64).pow(U256::from(decimals));
    whole_value
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(fraction_value))
        .ok_or(UnitsError::Overflow)
}

/// Format smallest units as a decimal string.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }

    let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
    format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
}
