//! The persisted application blob

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Item, UserAccount};
use crate::types::{ItemCode, ItemId};

/// Everything the tracker persists, as one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl AppData {
    pub fn find_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn find_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub fn find_item_by_code(&self, code: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| !i.code().is_blank() && i.code().as_str() == code)
    }

    pub fn find_user(&self, username: &str) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.username == username)
    }

    /// A code not used by any item in the collection
    pub fn unique_code(&self) -> ItemCode {
        let taken: HashSet<&str> = self.items.iter().map(|i| i.code().as_str()).collect();
        loop {
            let code = ItemCode::generate();
            if !taken.contains(code.as_str()) {
                return code;
            }
        }
    }

    /// Give every code-less item a fresh unique code. Returns how many
    /// items changed; a second call always returns 0.
    pub fn backfill_item_codes(&mut self) -> usize {
        let mut taken: HashSet<ItemCode> = self
            .items
            .iter()
            .filter(|i| !i.code().is_blank())
            .map(|i| i.code().clone())
            .collect();

        let mut assigned = 0;
        for item in self.items.iter_mut().filter(|i| i.code().is_blank()) {
            let code = loop {
                let candidate = ItemCode::generate();
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(code.clone());
            if item.assign_code_if_blank(code) {
                assigned += 1;
            }
        }
        assigned
    }
}
