//! Item repository: create, edit and look up inventory items

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{format_clp, Item, ItemFields, ItemId, MovementTotals, Price, StockStatus};

use crate::error::{AppError, AppResult};
use crate::store::{lock, SharedStore};

/// Item service for managing the item collection
#[derive(Clone)]
pub struct ItemService {
    store: SharedStore,
    tax_rate: Decimal,
}

/// Everything the item detail view shows
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub status: StockStatus,
    pub totals: MovementTotals,
    pub price: Option<Price>,
    pub stock_value: Option<Decimal>,
    pub stock_value_display: Option<String>,
    /// Payload encoded in the item's QR label
    pub qr_payload: String,
}

/// Result of looking up a scanned code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMatch {
    pub item_id: ItemId,
    pub name: String,
}

impl ItemService {
    pub fn new(store: SharedStore, tax_rate: Decimal) -> Self {
        Self { store, tax_rate }
    }

    /// Create an item with a fresh id and a code no other item uses
    pub fn create(&self, fields: ItemFields) -> AppResult<Item> {
        let mut store = lock(&self.store)?;
        let code = store.data().unique_code();
        let item = Item::create(ItemId::generate(), code, &fields, self.tax_rate)?;

        store.data_mut().items.push(item.clone());
        store.persist();

        tracing::info!("Created item {} ({}) with stock {}", item.name(), item.code(), item.stock());
        Ok(item)
    }

    /// Replace an item's editable fields, keeping its code and history
    pub fn update(&self, id: &ItemId, fields: ItemFields) -> AppResult<Item> {
        let mut store = lock(&self.store)?;
        let tax_rate = self.tax_rate;
        let item = store
            .data_mut()
            .find_item_mut(id)
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        item.apply_edit(&fields, tax_rate)?;
        let updated = item.clone();
        store.persist();

        tracing::info!("Updated item {} ({})", updated.name(), updated.id());
        Ok(updated)
    }

    pub fn find_by_id(&self, id: &ItemId) -> AppResult<Option<Item>> {
        let store = lock(&self.store)?;
        Ok(store.data().find_item(id).cloned())
    }

    pub fn find_by_code(&self, code: &str) -> AppResult<Option<Item>> {
        let store = lock(&self.store)?;
        Ok(store.data().find_item_by_code(code).cloned())
    }

    /// All items in insertion order
    pub fn list(&self) -> AppResult<Vec<Item>> {
        let store = lock(&self.store)?;
        Ok(store.data().items.clone())
    }

    pub fn detail(&self, id: &ItemId) -> AppResult<ItemDetail> {
        let item = self
            .find_by_id(id)?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        let stock_value = item.stock_value();
        Ok(ItemDetail {
            status: item.status(),
            totals: item.totals(),
            price: item.price().copied(),
            stock_value,
            stock_value_display: stock_value.map(format_clp),
            qr_payload: item.code().to_string(),
            item,
        })
    }

    /// Match a scanned code against the collection
    pub fn resolve_scan(&self, code: &str) -> AppResult<Option<ScanMatch>> {
        let code = code.trim();
        let found = self.find_by_code(code)?.map(|item| ScanMatch {
            item_id: item.id().clone(),
            name: item.name().to_string(),
        });

        match &found {
            Some(m) => tracing::debug!("Scanned code {} matched {}", code, m.name),
            None => tracing::debug!("Scanned code {} matched nothing", code),
        }
        Ok(found)
    }
}
