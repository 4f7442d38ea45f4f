//! Stock table and suggestions

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reporting::{ReportingService, StockRow};
use crate::services::suggestion::{SuggestionResponse, SuggestionService};
use crate::AppState;

/// One row per item with status and stock value
pub async fn stock_table(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<StockRow>>> {
    let service = ReportingService::new(state.store.clone());
    Ok(Json(service.stock_table()?))
}

/// Suggestions from the last 7 days of movements
pub async fn suggestions(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<SuggestionResponse>> {
    let service = SuggestionService::new(state.store.clone());
    Ok(Json(service.report(Utc::now())?))
}
