//! Scanned code lookup

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::items::{ItemService, ScanMatch};
use crate::AppState;

/// Resolve a code read from a QR label
pub async fn resolve_scan(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<ScanMatch>> {
    let service = ItemService::new(state.store.clone(), state.config.pricing.tax_rate);
    service
        .resolve_scan(&code)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item with code {}", code.trim())))
}
