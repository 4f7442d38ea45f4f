//! HTTP handlers for item endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{Item, ItemFields, ItemId};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::items::{ItemDetail, ItemService};
use crate::AppState;

fn service(state: &AppState) -> ItemService {
    ItemService::new(state.store.clone(), state.config.pricing.tax_rate)
}

/// List all items
pub async fn list_items(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(service(&state).list()?))
}

/// Create an item
pub async fn create_item(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<ItemFields>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = service(&state).create(input)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item with its totals, price breakdown and QR payload
pub async fn get_item(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ItemDetail>> {
    let detail = service(&state).detail(&ItemId::from(item_id))?;
    Ok(Json(detail))
}

/// Update an item
pub async fn update_item(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(item_id): Path<String>,
    Json(input): Json<ItemFields>,
) -> AppResult<Json<Item>> {
    let item = service(&state).update(&ItemId::from(item_id), input)?;
    Ok(Json(item))
}
