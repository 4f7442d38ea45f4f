//! Suggestion engine over the whole item collection

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::SuggestionReport;

use crate::error::AppResult;
use crate::store::{lock, SharedStore};

#[derive(Clone)]
pub struct SuggestionService {
    store: SharedStore,
}

/// Report plus the lines to show the user
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub report: SuggestionReport,
    pub messages: Vec<String>,
}

impl SuggestionService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn report(&self, now: DateTime<Utc>) -> AppResult<SuggestionResponse> {
        let store = lock(&self.store)?;
        let report = SuggestionReport::build(&store.data().items, now);
        let messages = report.messages();
        Ok(SuggestionResponse { report, messages })
    }
}
