//! HTTP handlers for stock movements

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{ItemId, Movement, MovementType};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{LedgerService, MovementOutcome};
use crate::AppState;

/// Input for recording a movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub qty: i64,
}

/// Record a stock-in or stock-out
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<String>,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<MovementOutcome>)> {
    tracing::debug!("{} records {} {}", current_user.0 .0, input.kind, input.qty);
    let service = LedgerService::new(state.store.clone());
    let outcome = service.apply_movement(&ItemId::from(item_id), input.kind, input.qty)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Movement history of an item
pub async fn list_movements(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = LedgerService::new(state.store.clone());
    Ok(Json(service.movements(&ItemId::from(item_id))?))
}
