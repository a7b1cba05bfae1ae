// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup into [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the local catalog store | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `RPC_URL` | EVM JSON-RPC endpoint (`none` disables the wallet) | `http://127.0.0.1:8545` |
//! | `WALLET_PRIVATE_KEY` | Sign locally with this key instead of node accounts | unset |
//! | `MARKETPLACE_ARTIFACT` | Compiled marketplace contract JSON | `build/contracts/Marketplace.json` |
//! | `RESET_CATALOG` | Overwrite the catalog with the seed listings at startup | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use crate::storage::paths::DATA_ROOT;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the wallet provider's JSON-RPC endpoint.
///
/// An empty value or `none` starts the server without a wallet; listing,
/// buying and bidding then report that no wallet was detected.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Environment variable name for an optional hex private key.
pub const WALLET_PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

/// Environment variable name for the contract artifact path.
pub const MARKETPLACE_ARTIFACT_ENV: &str = "MARKETPLACE_ARTIFACT";

/// Environment variable name for forcing a catalog re-seed at startup.
pub const RESET_CATALOG_ENV: &str = "RESET_CATALOG";

/// Environment variable name for the log format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ARTIFACT_PATH: &str = "build/contracts/Marketplace.json";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// `None` when the wallet is disabled.
    pub rpc_url: Option<String>,
    pub wallet_private_key: Option<String>,
    pub artifact_path: PathBuf,
    pub reset_catalog: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_ROOT),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rpc_url: Some(DEFAULT_RPC_URL.to_string()),
            wallet_private_key: None,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            reset_catalog: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string());

        let rpc_url = match var(RPC_URL_ENV) {
            None => defaults.rpc_url,
            Some(url) if url.is_empty() || url.eq_ignore_ascii_case("none") => None,
            Some(url) => Some(url),
        };

        Self {
            data_dir: var(DATA_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            host: var(HOST_ENV)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            port: var(PORT_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            rpc_url,
            wallet_private_key: var(WALLET_PRIVATE_KEY_ENV).filter(|v| !v.is_empty()),
            artifact_path: var(MARKETPLACE_ARTIFACT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.artifact_path),
            reset_catalog: var(RESET_CATALOG_ENV).is_some_and(|v| is_truthy(&v)),
            log_format: match var(LOG_FORMAT_ENV).as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
