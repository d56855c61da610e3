//! Router configuration and server setup.

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // The wallet page may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/address_book",
            get(handlers::get_address_book).post(handlers::save_address_book),
        )
        .route("/api/node_status", get(handlers::node_status))
        .route("/api/user_status", get(handlers::user_status))
        .route("/api/transaction", post(handlers::submit_transaction))
        .route("/api/save_check", get(handlers::save_check))
        .layer(cors)
        .with_state(state)
}

/// Serves on an already bound listener until `signal` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("API server listening on {}", addr);
    }
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(signal)
        .await
}
