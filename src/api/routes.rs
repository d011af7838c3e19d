//! API Routes
//!
//! Configures the Axum router with all paging server endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::access_log::access_log;
use super::handlers::{get_pages_handler, health_handler, search_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /search` - Store a search result set, returns its first page
/// - `GET /?_getpages={id}` - Read a page of a stored search
/// - `GET /stats` - Get paging cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Access log: one `fhir.access` line per request
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/", get(get_pages_handler))
        .route("/search", post(search_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(access_log))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
