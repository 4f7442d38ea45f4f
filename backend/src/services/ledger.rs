//! Ledger engine: stock-in / stock-out movements

use chrono::Utc;
use serde::Serialize;
use shared::{validate_quantity, ItemId, Movement, MovementType, StockStatus, ThresholdAlert};

use crate::error::{AppError, AppResult};
use crate::store::{lock, SharedStore};

/// Ledger service for recording movements
#[derive(Clone)]
pub struct LedgerService {
    store: SharedStore,
}

/// What the caller learns after a movement is applied
#[derive(Debug, Clone, Serialize)]
pub struct MovementOutcome {
    pub movement: Movement,
    pub stock: i64,
    pub status: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<ThresholdAlert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
}

impl LedgerService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Apply a movement to an item.
    ///
    /// Checks run in order: quantity, item existence, then available stock.
    pub fn apply_movement(
        &self,
        item_id: &ItemId,
        kind: MovementType,
        qty: i64,
    ) -> AppResult<MovementOutcome> {
        validate_quantity(qty)?;

        let mut store = lock(&self.store)?;
        let item = store
            .data_mut()
            .find_item_mut(item_id)
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        let movement = item.record_movement(kind, qty, Utc::now())?;
        let stock = item.stock();
        let status = item.status();
        let alert = ThresholdAlert::evaluate(item);
        let name = item.name().to_string();
        store.persist();

        tracing::info!("Recorded {} {} for {}, stock now {}", kind, qty, name, stock);
        if let Some(alert) = &alert {
            tracing::warn!("{}", alert);
        }

        Ok(MovementOutcome {
            movement,
            stock,
            status,
            alert_message: alert.as_ref().map(ToString::to_string),
            alert,
        })
    }

    /// Movement history of an item, oldest first
    pub fn movements(&self, item_id: &ItemId) -> AppResult<Vec<Movement>> {
        let store = lock(&self.store)?;
        store
            .data()
            .find_item(item_id)
            .map(|item| item.transactions().to_vec())
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }
}
