//! Operator HTTP endpoint.
//!
//! `GET /health` is open so orchestrators can probe it; everything under
//! `/admin` needs `Authorization: Bearer <api_key>`.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::blockchain::ChainClient;
use crate::claim::ClaimOrchestrator;

/// Shared state for admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub orchestrator: Arc<ClaimOrchestrator>,
    pub chain: Arc<dyn ChainClient>,
    pub api_key: Arc<str>,
    pub chain_id: u64,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    let protected = Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/faucet", get(get_faucet))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

    Router::new()
        .route("/health", get(get_health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the admin router until the listener fails.
pub async fn serve(listener: TcpListener, state: AdminState) -> std::io::Result<()> {
    tracing::info!(address = ?listener.local_addr().ok(), "Admin endpoint listening");
    axum::serve(listener, setup_admin_router(state)).await
}
