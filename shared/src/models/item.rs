//! Inventory items and their ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{classify_stock, Movement, MovementTotals, MovementType, Price, PriceInput, PriceMode, StockStatus};
use crate::types::{ItemCode, ItemId};
use crate::validation::{
    validate_item_name, validate_quantity, validate_stock_level, validate_thresholds,
    ValidationError,
};

/// Why a movement was refused. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Quantity must be greater than 0 (got {qty})")]
    InvalidQuantity { qty: i64 },

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("Stock level would overflow")]
    StockOverflow,
}

/// Editable fields of an item, as submitted by the item form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min: i64,
    #[serde(default)]
    pub max: i64,
    /// Absolute stock level; replaces the current one on edit
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price: Option<PriceInput>,
}

impl ItemFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, amount: Decimal, mode: PriceMode) -> Self {
        self.price = Some(PriceInput { amount, mode });
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_item_name(&self.name)?;
        validate_thresholds(self.min, self.max)?;
        validate_stock_level(self.stock)?;
        Ok(())
    }

    fn resolve_price(&self, tax_rate: Decimal) -> Result<Option<Price>, ValidationError> {
        match self.price {
            Some(input) => input.resolve(tax_rate),
            None => Ok(None),
        }
    }

    fn trimmed_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

/// A tracked inventory unit.
///
/// `stock` and `transactions` can only change through [`Item::record_movement`]
/// or a validated edit, so `stock >= 0` holds for every value this type writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    id: ItemId,
    code: ItemCode,
    name: String,
    description: Option<String>,
    min: i64,
    max: i64,
    stock: i64,
    price: Option<Price>,
    transactions: Vec<Movement>,
}

impl Item {
    /// Build a new item from validated form fields
    pub fn create(
        id: ItemId,
        code: ItemCode,
        fields: &ItemFields,
        tax_rate: Decimal,
    ) -> Result<Self, ValidationError> {
        fields.validate()?;
        let price = fields.resolve_price(tax_rate)?;

        Ok(Self {
            id,
            code,
            name: fields.name.trim().to_string(),
            description: fields.trimmed_description(),
            min: fields.min,
            max: fields.max,
            stock: fields.stock,
            price,
            transactions: Vec::new(),
        })
    }

    /// Replace every editable field, including an absolute stock reset.
    /// `code` and `transactions` are left untouched.
    pub fn apply_edit(&mut self, fields: &ItemFields, tax_rate: Decimal) -> Result<(), ValidationError> {
        fields.validate()?;
        let price = fields.resolve_price(tax_rate)?;

        self.name = fields.name.trim().to_string();
        self.description = fields.trimmed_description();
        self.min = fields.min;
        self.max = fields.max;
        self.stock = fields.stock;
        self.price = price;
        Ok(())
    }

    /// Apply a stock movement recorded at `at`.
    ///
    /// Every precondition is checked before anything changes.
    pub fn record_movement(
        &mut self,
        kind: MovementType,
        qty: i64,
        at: DateTime<Utc>,
    ) -> Result<Movement, LedgerError> {
        validate_quantity(qty).map_err(|_| LedgerError::InvalidQuantity { qty })?;

        let new_stock = match kind {
            MovementType::In => self.stock.checked_add(qty).ok_or(LedgerError::StockOverflow)?,
            MovementType::Out => {
                if self.stock < qty {
                    return Err(LedgerError::InsufficientStock {
                        requested: qty,
                        available: self.stock,
                    });
                }
                self.stock - qty
            }
        };

        let movement = Movement { date: at, kind, qty };
        self.transactions.push(movement.clone());
        self.stock = new_stock;
        Ok(movement)
    }

    /// Set a code on a legacy item that has none. Returns whether it changed.
    pub fn assign_code_if_blank(&mut self, code: ItemCode) -> bool {
        if self.code.is_blank() {
            self.code = code;
            true
        } else {
            false
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Maximum stock; 0 means no maximum configured
    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    pub fn transactions(&self) -> &[Movement] {
        &self.transactions
    }

    pub fn status(&self) -> StockStatus {
        classify_stock(self.stock, self.min, self.max)
    }

    /// Totals over the full movement history
    pub fn totals(&self) -> MovementTotals {
        MovementTotals::from_movements(&self.transactions)
    }

    /// Value of the stock on hand at the tax-inclusive unit price.
    /// `None` without a price, without stock, or when the product overflows.
    pub fn stock_value(&self) -> Option<Decimal> {
        let price = self.price.as_ref()?;
        if price.total > Decimal::ZERO && self.stock > 0 {
            price.total.checked_mul(Decimal::from(self.stock))
        } else {
            None
        }
    }
}

/// Persisted shape of an item, compatible with the browser blob
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    id: ItemId,
    #[serde(default)]
    code: ItemCode,
    name: String,
    #[serde(default, rename = "desc")]
    description: Option<String>,
    #[serde(default)]
    min: i64,
    #[serde(default)]
    max: i64,
    #[serde(default)]
    stock: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price_net: Option<Decimal>,
    #[serde(default, alias = "priceIVA", with = "rust_decimal::serde::float_option")]
    price_tax: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price_total: Option<Decimal>,
    #[serde(default)]
    price_mode: Option<PriceMode>,
    #[serde(default)]
    transactions: Vec<Movement>,
}

impl From<ItemRecord> for Item {
    fn from(r: ItemRecord) -> Self {
        // pricing is all-or-nothing; a partial set reads as "no price"
        let price = match (r.price_net, r.price_tax, r.price_total, r.price_mode) {
            (Some(net), Some(tax), Some(total), Some(mode)) => Some(Price { net, tax, total, mode }),
            _ => None,
        };

        Self {
            id: r.id,
            code: r.code,
            name: r.name,
            description: r.description.filter(|d| !d.is_empty()),
            min: r.min,
            max: r.max,
            stock: r.stock,
            price,
            transactions: r.transactions,
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            code: item.code,
            name: item.name,
            description: item.description,
            min: item.min,
            max: item.max,
            stock: item.stock,
            price_net: item.price.map(|p| p.net),
            price_tax: item.price.map(|p| p.tax),
            price_total: item.price.map(|p| p.total),
            price_mode: item.price.map(|p| p.mode),
            transactions: item.transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rate() -> Decimal {
        Decimal::new(19, 2)
    }

    fn item(fields: ItemFields) -> Item {
        Item::create(ItemId::generate(), ItemCode::generate(), &fields, rate()).unwrap()
    }

    #[test]
    fn test_create_trims_and_prices() {
        let it = item(
            ItemFields::new("  Guantes  ")
                .with_description("  ")
                .with_thresholds(2, 10)
                .with_stock(4)
                .with_price(Decimal::from(1190), PriceMode::Total),
        );
        assert_eq!(it.name(), "Guantes");
        assert_eq!(it.description(), None);
        assert_eq!(it.stock(), 4);
        assert!(it.transactions().is_empty());
        let price = it.price().unwrap();
        assert_eq!(price.net, Decimal::from(1000));
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let id = ItemId::generate();
        let code = ItemCode::generate();
        assert_eq!(
            Item::create(id.clone(), code.clone(), &ItemFields::new(""), rate()),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            Item::create(id.clone(), code.clone(), &ItemFields::new("A").with_thresholds(9, 3), rate()),
            Err(ValidationError::MinAboveMax { min: 9, max: 3 })
        );
        assert!(Item::create(id, code, &ItemFields::new("A").with_stock(-1), rate()).is_err());
    }

    #[test]
    fn test_zero_price_is_no_price() {
        let it = item(ItemFields::new("A").with_price(Decimal::ZERO, PriceMode::Net));
        assert!(it.price().is_none());
        assert!(it.stock_value().is_none());
    }

    #[test]
    fn test_record_in_and_out() {
        let mut it = item(ItemFields::new("Cable").with_stock(10));
        let now = Utc::now();

        let m = it.record_movement(MovementType::In, 5, now).unwrap();
        assert_eq!(m.qty, 5);
        assert_eq!(it.stock(), 15);

        it.record_movement(MovementType::Out, 15, now).unwrap();
        assert_eq!(it.stock(), 0);
        assert_eq!(it.transactions().len(), 2);
    }

    #[test]
    fn test_over_withdrawal_rejected_without_mutation() {
        let mut it = item(ItemFields::new("Cable").with_stock(3));
        let err = it.record_movement(MovementType::Out, 4, Utc::now()).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientStock { requested: 4, available: 3 });
        assert_eq!(it.stock(), 3);
        assert!(it.transactions().is_empty());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut it = item(ItemFields::new("Cable").with_stock(3));
        assert_eq!(
            it.record_movement(MovementType::In, 0, Utc::now()),
            Err(LedgerError::InvalidQuantity { qty: 0 })
        );
        assert_eq!(
            it.record_movement(MovementType::Out, -2, Utc::now()),
            Err(LedgerError::InvalidQuantity { qty: -2 })
        );
        assert_eq!(it.stock(), 3);
        assert!(it.transactions().is_empty());
    }

    #[test]
    fn test_overflow_rejected() {
        let mut it = item(ItemFields::new("Cable").with_stock(i64::MAX));
        assert_eq!(
            it.record_movement(MovementType::In, 1, Utc::now()),
            Err(LedgerError::StockOverflow)
        );
        assert_eq!(it.stock(), i64::MAX);
    }

    #[test]
    fn test_totals_after_reset_history() {
        let mut it = item(ItemFields::new("Cable"));
        it.record_movement(MovementType::In, i64::MAX, Utc::now()).unwrap();
        it.apply_edit(&ItemFields::new("Cable"), rate()).unwrap();
        it.record_movement(MovementType::In, 1, Utc::now()).unwrap();

        let totals = it.totals();
        assert_eq!(totals.total_in, i64::MAX);
        assert_eq!(totals.count, 2);
        assert_eq!(it.stock(), 1);
    }

    #[test]
    fn test_edit_keeps_code_and_history() {
        let mut it = item(ItemFields::new("Cable").with_stock(3));
        it.record_movement(MovementType::In, 2, Utc::now() - Duration::hours(1))
            .unwrap();
        let code = it.code().clone();

        it.apply_edit(&ItemFields::new("Cable UTP").with_stock(40), rate())
            .unwrap();
        assert_eq!(it.name(), "Cable UTP");
        assert_eq!(it.stock(), 40);
        assert_eq!(it.code(), &code);
        assert_eq!(it.transactions().len(), 1);
    }

    #[test]
    fn test_failed_edit_leaves_item_unchanged() {
        let mut it = item(ItemFields::new("Cable").with_thresholds(1, 5));
        let before = it.clone();
        assert!(it
            .apply_edit(&ItemFields::new("Cable").with_thresholds(6, 5), rate())
            .is_err());
        assert_eq!(it, before);
    }

    #[test]
    fn test_oversized_price_rejected() {
        let huge = Decimal::from_str_exact("70000000000000000000000000000").unwrap();
        let fields = ItemFields::new("A").with_price(huge, PriceMode::Net);
        assert_eq!(
            Item::create(ItemId::generate(), ItemCode::generate(), &fields, rate()),
            Err(ValidationError::AmountOutOfRange)
        );

        let mut it = item(ItemFields::new("A").with_stock(2));
        let before = it.clone();
        assert_eq!(it.apply_edit(&fields, rate()), Err(ValidationError::AmountOutOfRange));
        assert_eq!(it, before);
    }

    #[test]
    fn test_stock_value_overflow_is_none() {
        let it = item(
            ItemFields::new("A")
                .with_stock(1_000_000_000)
                .with_price(Decimal::from_str_exact("100000000000000000000").unwrap(), PriceMode::Net),
        );
        assert!(it.price().is_some());
        assert_eq!(it.stock_value(), None);
    }

    #[test]
    fn test_stock_value() {
        let it = item(
            ItemFields::new("A")
                .with_stock(3)
                .with_price(Decimal::from(100), PriceMode::Net),
        );
        assert_eq!(it.stock_value(), Some(Decimal::from(357)));

        let empty = item(ItemFields::new("B").with_price(Decimal::from(100), PriceMode::Net));
        assert_eq!(empty.stock_value(), None);
    }

    #[test]
    fn test_loads_legacy_record() {
        let json = r#"{
            "id": "k3j2h1x9",
            "name": "Tornillos",
            "desc": "",
            "min": 5,
            "max": 0,
            "stock": 12,
            "priceNet": 1000,
            "priceIVA": 190,
            "priceTotal": 1190,
            "priceMode": "without",
            "transactions": [{"date": "2025-01-02T10:00:00.000Z", "type": "in", "qty": 12}]
        }"#;
        let it: Item = serde_json::from_str(json).unwrap();
        assert_eq!(it.id().as_str(), "k3j2h1x9");
        assert!(it.code().is_blank());
        assert_eq!(it.description(), None);
        let price = it.price().unwrap();
        assert_eq!(price.tax, Decimal::from(190));
        assert_eq!(price.mode, PriceMode::Net);
        assert_eq!(it.transactions().len(), 1);
    }

    #[test]
    fn test_string_amounts_still_load() {
        let json = r#"{"id":"a","code":"IT-1","name":"X","priceNet":"1000","priceTax":"190","priceTotal":"1190","priceMode":"net"}"#;
        let it: Item = serde_json::from_str(json).unwrap();
        assert_eq!(it.price().unwrap().total, Decimal::from(1190));
    }

    #[test]
    fn test_partial_price_loads_as_none() {
        let json = r#"{"id":"a","code":"IT-1","name":"X","priceNet":10,"priceIVA":null,"priceTotal":null,"priceMode":null}"#;
        let it: Item = serde_json::from_str(json).unwrap();
        assert!(it.price().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let it = item(ItemFields::new("A").with_price(Decimal::from(10), PriceMode::Net));
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["priceNet"].as_f64(), Some(10.0));
        assert_eq!(json["priceTax"].as_f64(), Some(1.9));
        assert_eq!(json["priceTotal"].as_f64(), Some(11.9));
        assert_eq!(json["priceMode"], "net");
        assert!(json.get("desc").is_some());
    }

    #[test]
    fn test_assign_code_only_when_blank() {
        let mut it = item(ItemFields::new("A"));
        let code = it.code().clone();
        assert!(!it.assign_code_if_blank(ItemCode::generate()));
        assert_eq!(it.code(), &code);
    }
}
