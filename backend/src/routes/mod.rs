//! Route definitions for the stock tracker

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Account routes (public)
        .nest("/auth", auth_routes())
        // Price preview (public)
        .route("/pricing/preview", get(handlers::preview))
        // Protected routes - items and their ledger
        .nest("/items", item_routes(state.clone()))
        // Protected routes - scanned code lookup
        .nest("/scan", scan_routes(state.clone()))
        // Protected routes - stock table and suggestions
        .nest("/stock", stock_routes(state))
}

/// Account routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/session", get(handlers::session))
}

/// Item routes (protected)
fn item_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            get(handlers::get_item).put(handlers::update_item),
        )
        .route(
            "/:item_id/movements",
            get(handlers::list_movements).post(handlers::record_movement),
        )
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

/// Scan routes (protected)
fn scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:code", get(handlers::resolve_scan))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

/// Stock routes (protected)
fn stock_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::stock_table))
        .route("/suggestions", get(handlers::suggestions))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}
