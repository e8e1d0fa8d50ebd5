// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kennel serve`: open the store, build the router, serve until a
//! shutdown signal, then close the local database if one was opened.

use std::sync::Arc;

use kennel_config::KennelConfig;
use kennel_core::{DogStore, KennelError};
use kennel_gateway::{AppState, GatewayConfig, Selection};
use kennel_storage::{Database, LibsqlDogStore, SqliteDogStore, is_remote_url};
use secrecy::SecretString;
use tracing::info;

use crate::shutdown;

pub async fn run_serve(config: KennelConfig) -> Result<(), KennelError> {
    init_tracing(&config.server.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "kennel starting");

    let token = config.database.auth_token_secret();
    let (store, db) = open_store(&config.database.url, token.as_ref()).await?;
    info!(store = store.name(), "store ready");

    let state = AppState::new(store, Selection::new());
    let gateway = GatewayConfig {
        bind_addr: config.server.bind_addr(),
        public_dir: config.server.public_dir.clone(),
    };

    let cancel = shutdown::install_signal_handler();
    let served = kennel_gateway::start_server(&gateway, state, cancel).await;

    // Close even when serving failed, then report the first error.
    let closed = match db {
        Some(db) => db.close().await,
        None => Ok(()),
    };
    served?;
    closed?;

    info!("kennel stopped");
    Ok(())
}

/// Pick the store for `url` by scheme. Remote libSQL endpoints get a
/// [`LibsqlDogStore`]; anything else opens a local [`Database`], which is
/// returned so the caller can close it.
pub(crate) async fn open_store(
    url: &str,
    auth_token: Option<&SecretString>,
) -> Result<(Arc<dyn DogStore>, Option<Database>), KennelError> {
    if is_remote_url(url) {
        let store = LibsqlDogStore::connect(url, auth_token).await?;
        return Ok((Arc::new(store), None));
    }
    let db = Database::open(url, auth_token).await?;
    Ok((Arc::new(SqliteDogStore::new(db.clone())), Some(db)))
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kennel={log_level},kennel_storage={log_level},kennel_gateway={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
