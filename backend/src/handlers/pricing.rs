//! Price breakdown preview, shown while a price is typed

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{compute_price, format_clp, Price, PriceMode};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub amount: Option<Decimal>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PricePreview {
    pub tax_rate: Decimal,
    pub currency: String,
    /// `None` when no positive amount was given
    pub price: Option<Price>,
    pub net_display: Option<String>,
    pub tax_display: Option<String>,
    pub total_display: Option<String>,
}

pub async fn preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<Json<PricePreview>> {
    let mode = match query.mode.as_deref() {
        None | Some("") => PriceMode::Total,
        Some(raw) => raw.parse::<PriceMode>().map_err(|e| AppError::Validation {
            field: "mode".to_string(),
            message: e.to_string(),
            message_es: "Modo de precio desconocido.".to_string(),
        })?,
    };

    let tax_rate = state.config.pricing.tax_rate;
    let price = compute_price(query.amount, mode, tax_rate)?;

    Ok(Json(PricePreview {
        tax_rate,
        currency: state.config.pricing.currency.clone(),
        net_display: price.map(|p| format_clp(p.net)),
        tax_display: price.map(|p| format_clp(p.tax)),
        total_display: price.map(|p| format_clp(p.total)),
        price,
    }))
}
