// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use kennel_core::{DogStore, KennelError};
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::selection::Selection;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record storage.
    pub store: Arc<dyn DogStore>,
    /// The process-wide editing cursor.
    pub selection: Selection,
}

impl AppState {
    pub fn new(store: Arc<dyn DogStore>, selection: Selection) -> Self {
        Self { store, selection }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.name())
            .field("selection", &self.selection.current())
            .finish()
    }
}

/// Server configuration (mirrors `ServerConfig` from kennel-config).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// `host:port` to bind.
    pub bind_addr: String,
    /// Directory served for paths no route matches.
    pub public_dir: String,
}

/// Build the application router.
///
/// Paths no route matches fall through to static files under `public_dir`.
pub fn build_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/dog", post(handlers::create_dog))
        .route(
            "/dog/{id}",
            put(handlers::update_dog).delete(handlers::delete_dog),
        )
        .route("/deselect", get(handlers::deselect))
        .route("/form", get(handlers::form))
        .route("/select/{id}", get(handlers::select))
        .route("/table-rows", get(handlers::table_rows))
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), KennelError> {
    let app = build_router(state, &config.public_dir);

    let addr = &config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| KennelError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!(public_dir = %config.public_dir, "listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| KennelError::Internal(format!("server error: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}
