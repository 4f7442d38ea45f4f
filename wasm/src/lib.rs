//! WebAssembly module for the stock tracker
//!
//! Provides client-side computation for:
//! - Price breakdown while typing
//! - Stock status pills and threshold alerts
//! - Restocking suggestions
//! - CLP formatting and form validation

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("stock tracker wasm loaded"));
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Price breakdown with display strings
#[derive(Debug, Serialize)]
pub struct PricePreview {
    pub price: Option<Price>,
    pub net: Option<String>,
    pub tax: Option<String>,
    pub total: Option<String>,
}

fn parse_amount(raw: &str) -> Result<Option<Decimal>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .map(Some)
        .map_err(|e| format!("Invalid amount {}: {}", raw, e))
}

/// Pure part of [`price_preview`]
pub fn preview_price(amount: &str, mode: &str, tax_rate: &str) -> Result<PricePreview, String> {
    let mode = PriceMode::from_str(mode).map_err(|e| e.to_string())?;
    let rate = parse_amount(tax_rate)?.unwrap_or(Decimal::ZERO);
    let price = compute_price(parse_amount(amount)?, mode, rate).map_err(|e| e.to_string())?;

    Ok(PricePreview {
        net: price.map(|p| format_clp(p.net)),
        tax: price.map(|p| format_clp(p.tax)),
        total: price.map(|p| format_clp(p.total)),
        price,
    })
}

/// Price breakdown for the item form, as JSON
#[wasm_bindgen]
pub fn price_preview(amount: &str, mode: &str, tax_rate: &str) -> Result<String, JsValue> {
    let preview = preview_price(amount, mode, tax_rate).map_err(to_js_error)?;
    serde_json::to_string(&preview).map_err(|e| to_js_error(e.to_string()))
}

/// Stock status pill text: "OK", "Low" or "High"
#[wasm_bindgen]
pub fn stock_status(stock: i64, min: i64, max: i64) -> String {
    classify_stock(stock, min, max).to_string()
}

/// Format a whole-peso amount as `$1.234.567`
#[wasm_bindgen]
pub fn format_currency(value: f64) -> String {
    let decimal = Decimal::try_from(value).unwrap_or(Decimal::ZERO);
    format_clp(decimal)
}

/// Check item form fields; returns the offending field name, if any
#[wasm_bindgen]
pub fn validate_item_fields(fields_json: &str) -> Result<Option<String>, JsValue> {
    let fields: ItemFields = serde_json::from_str(fields_json)
        .map_err(|e| to_js_error(format!("Invalid item JSON: {}", e)))?;
    Ok(fields.validate().err().map(|e| e.field().to_string()))
}

/// Pure part of [`threshold_alert`]
pub fn alert_for(item_json: &str) -> Result<Option<String>, String> {
    let item: Item =
        serde_json::from_str(item_json).map_err(|e| format!("Invalid item JSON: {}", e))?;
    Ok(ThresholdAlert::evaluate(&item).map(|a| a.to_string()))
}

/// Alert text for an item's current stock, if a threshold is crossed
#[wasm_bindgen]
pub fn threshold_alert(item_json: &str) -> Result<Option<String>, JsValue> {
    alert_for(item_json).map_err(to_js_error)
}

/// Pure part of [`suggestions`]
pub fn suggestions_at(items_json: &str, now: DateTime<Utc>) -> Result<Vec<String>, String> {
    let items: Vec<Item> =
        serde_json::from_str(items_json).map_err(|e| format!("Invalid items JSON: {}", e))?;
    Ok(SuggestionReport::build(&items, now).messages())
}

/// Suggestion lines for a list of items, as a JSON array of strings
#[wasm_bindgen]
pub fn suggestions(items_json: &str) -> Result<String, JsValue> {
    let millis = js_sys::Date::now() as i64;
    let now = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| to_js_error(format!("Invalid clock value {}", millis)))?;
    let lines = suggestions_at(items_json, now).map_err(to_js_error)?;
    serde_json::to_string(&lines).map_err(|e| to_js_error(e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_suggestions_uses_browser_clock() {
        let json = suggestions("[]").unwrap();
        let lines: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_price_preview_rejects_unknown_mode() {
        assert!(price_preview("10", "gross", "0.19").is_err());
    }
}
