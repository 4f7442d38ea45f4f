//! Local user accounts

use serde::{Deserialize, Serialize};

/// A local account. `password` holds a bcrypt hash; blobs written by the
/// browser app may still contain a plaintext value until the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl UserAccount {
    /// Whether the stored secret is already a bcrypt hash
    pub fn has_hashed_password(&self) -> bool {
        ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| self.password_hash.starts_with(prefix))
    }
}
