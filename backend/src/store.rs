//! In-memory application state backed by a single persisted blob

use std::sync::{Arc, Mutex, MutexGuard};

use shared::AppData;

use crate::error::{AppError, AppResult};
use crate::storage::{BlobStorage, StorageError};

/// The one owner of all users and items
pub struct Store {
    data: AppData,
    storage: Box<dyn BlobStorage>,
    key: String,
}

/// Store handle shared between request handlers
pub type SharedStore = Arc<Mutex<Store>>;

impl Store {
    /// Load state from `storage`, starting empty when the blob is missing or
    /// unreadable. Items without a code are given one, and the result is
    /// written back when that changed anything.
    pub fn load(storage: impl BlobStorage + 'static, key: impl Into<String>) -> Self {
        let key = key.into();

        let data = match storage.read(&key) {
            Ok(Some(blob)) => match serde_json::from_str::<AppData>(&blob) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Stored state under {} is corrupt, starting empty: {}", key, e);
                    AppData::default()
                }
            },
            Ok(None) => {
                tracing::info!("No stored state under {}, starting empty", key);
                AppData::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read stored state under {}: {}", key, e);
                AppData::default()
            }
        };

        let mut store = Self {
            data,
            storage: Box::new(storage),
            key,
        };

        let assigned = store.data.backfill_item_codes();
        if assigned > 0 {
            tracing::info!("Assigned codes to {} legacy items", assigned);
            store.persist();
        }

        tracing::info!(
            "Loaded {} items and {} users",
            store.data.items.len(),
            store.data.users.len()
        );
        store
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    /// Write the whole blob
    pub fn try_persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.data)?;
        self.storage.write(&self.key, &blob)
    }

    /// Write the whole blob; failures are logged and in-memory state stays
    /// authoritative
    pub fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            tracing::error!("Failed to persist state under {}: {}", self.key, e);
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }
}

/// Lock the shared store
pub fn lock(store: &SharedStore) -> AppResult<MutexGuard<'_, Store>> {
    store
        .lock()
        .map_err(|_| AppError::Internal("State lock poisoned".to_string()))
}
