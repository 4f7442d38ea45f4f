//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::store::lock;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage_key: String,
    /// `None` when the state could not be read
    pub items: Option<usize>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let items = match lock(&state.store) {
        Ok(store) => Some(store.data().items.len()),
        Err(e) => {
            tracing::error!("Health check could not read state: {}", e);
            None
        }
    };
    let status = if items.is_some() { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage_key: state.config.storage.key.clone(),
        items,
    })
}
