// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process, sync::Arc, time::Duration};

use axum_server::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use blockbay_server::{
    api::router,
    blockchain::{MarketplaceArtifact, RpcWalletProvider},
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
    storage::{ListingRepository, LocalStorage, StoragePaths},
};

/// Time in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    init_tracing(config.log_format);

    // Storage and catalog
    let mut storage = LocalStorage::new(StoragePaths::new(&config.data_dir));
    if let Err(e) = storage.initialize() {
        error!(data_dir = %config.data_dir.display(), error = %e, "Failed to initialize storage");
        process::exit(1);
    }
    match ListingRepository::new(&storage).initialize(config.reset_catalog) {
        Ok(false) => info!("Using existing listing catalog"),
        Ok(true) => {}
        Err(e) => {
            error!(error = %e, "Failed to initialize listing catalog");
            process::exit(1);
        }
    }

    let mut state = AppState::new(storage);

    // Wallet provider
    match config.rpc_url.as_deref() {
        Some(rpc_url) => {
            match RpcWalletProvider::connect(rpc_url, config.wallet_private_key.as_deref()) {
                Ok(wallet) => {
                    info!(rpc_url, "Wallet provider configured");
                    state = state.with_wallet(Arc::new(wallet));
                }
                Err(e) => warn!(rpc_url, error = %e, "Wallet provider disabled"),
            }
        }
        None => warn!("RPC_URL disabled; running without a wallet provider"),
    }

    // Contract artifact
    match MarketplaceArtifact::load(&config.artifact_path) {
        Ok(artifact) => {
            info!(
                path = %config.artifact_path.display(),
                contract = artifact.contract_name.as_deref().unwrap_or("unnamed"),
                networks = artifact.networks.len(),
                "Loaded marketplace contract artifact"
            );
            state = state.with_artifact(artifact);
        }
        Err(e) => warn!(error = %e, "Marketplace contract artifact not loaded"),
    }

    let app = router(state);

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind = %config.bind_addr(), error = %e, "Failed to parse bind address");
            process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let handle = Handle::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));
    tokio::spawn({
        let handle = handle.clone();
        let shutdown = shutdown.clone();
        async move {
            shutdown.cancelled().await;
            info!("Shutting down; draining connections");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    info!(%addr, "BlockBay server listening (docs at /docs)");

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        error!(error = %e, "HTTP server failed");
        process::exit(1);
    }

    info!("Server stopped");
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    shutdown.cancel();
}
