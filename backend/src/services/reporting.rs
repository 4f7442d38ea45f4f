//! Stock table rows

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{format_clp, Item, ItemCode, ItemId, StockStatus};

use crate::error::AppResult;
use crate::store::{lock, SharedStore};

#[derive(Clone)]
pub struct ReportingService {
    store: SharedStore,
}

/// One line of the stock table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockRow {
    pub id: ItemId,
    pub code: ItemCode,
    pub name: String,
    pub description: Option<String>,
    pub stock: i64,
    pub min: i64,
    /// `None` when no maximum is configured
    pub max: Option<i64>,
    pub unit_total: Option<Decimal>,
    pub unit_total_display: Option<String>,
    pub stock_value: Option<Decimal>,
    pub stock_value_display: Option<String>,
    pub status: StockStatus,
}

impl From<&Item> for StockRow {
    fn from(item: &Item) -> Self {
        let unit_total = item.price().map(|p| p.total);
        let stock_value = item.stock_value();
        Self {
            id: item.id().clone(),
            code: item.code().clone(),
            name: item.name().to_string(),
            description: item.description().map(str::to_string),
            stock: item.stock(),
            min: item.min(),
            max: (item.max() > 0).then_some(item.max()),
            unit_total,
            unit_total_display: unit_total.map(format_clp),
            stock_value,
            stock_value_display: stock_value.map(format_clp),
            status: item.status(),
        }
    }
}

impl ReportingService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn stock_table(&self) -> AppResult<Vec<StockRow>> {
        let store = lock(&self.store)?;
        Ok(store.data().items.iter().map(StockRow::from).collect())
    }
}
