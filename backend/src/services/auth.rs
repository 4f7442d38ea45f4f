//! Authentication service for local accounts and the single active session

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};
use shared::{validate_credentials, UserAccount};

use crate::error::{AppError, AppResult};
use crate::store::{lock, SharedStore};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: SharedStore,
    bcrypt_cost: u32,
}

/// Username/password pair submitted by the login and register forms
#[derive(Debug, Deserialize)]
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
}

/// Who is logged in, if anyone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub username: Option<String>,
}

impl AuthService {
    pub fn new(store: SharedStore, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Create an account and log it in
    pub fn register(&self, input: CredentialsInput) -> AppResult<SessionInfo> {
        let username = input.username.trim().to_string();
        validate_credentials(&username, &input.password)?;

        // Hash before taking the lock
        let password_hash = hash(&input.password, self.bcrypt_cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let mut store = lock(&self.store)?;
        if store.data().find_user(&username).is_some() {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let data = store.data_mut();
        data.users.push(UserAccount {
            username: username.clone(),
            password_hash,
        });
        data.current_user = Some(username.clone());
        store.persist();

        tracing::info!("Registered user {}", username);
        Ok(SessionInfo {
            username: Some(username),
        })
    }

    /// Verify credentials and start a session.
    ///
    /// Accounts still holding a plaintext password are rehashed on success.
    pub fn login(&self, input: CredentialsInput) -> AppResult<SessionInfo> {
        let username = input.username.trim().to_string();
        validate_credentials(&username, &input.password)?;

        let account = {
            let store = lock(&self.store)?;
            store
                .data()
                .find_user(&username)
                .cloned()
                .ok_or(AppError::InvalidCredentials)?
        };

        // a plaintext password that merely looks like a bcrypt hash fails to
        // verify and is compared as plaintext instead
        let verified = if account.has_hashed_password() {
            verify(&input.password, &account.password_hash)
                .map_err(|e| {
                    tracing::warn!("Stored password for {} is not a valid hash: {}", username, e)
                })
                .ok()
        } else {
            None
        };

        let (valid, rehashed) = match verified {
            Some(valid) => (valid, None),
            None if account.password_hash == input.password => {
                let upgraded = hash(&input.password, self.bcrypt_cost)
                    .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
                (true, Some(upgraded))
            }
            None => (false, None),
        };

        if !valid {
            tracing::debug!("Rejected login for {}", username);
            return Err(AppError::InvalidCredentials);
        }

        let mut store = lock(&self.store)?;
        let data = store.data_mut();
        if let Some(new_hash) = rehashed {
            if let Some(user) = data.users.iter_mut().find(|u| u.username == username) {
                user.password_hash = new_hash;
                tracing::info!("Upgraded stored password for {}", username);
            }
        }
        data.current_user = Some(username.clone());
        store.persist();

        tracing::info!("User {} logged in", username);
        Ok(SessionInfo {
            username: Some(username),
        })
    }

    pub fn logout(&self) -> AppResult<SessionInfo> {
        let mut store = lock(&self.store)?;
        if let Some(username) = store.data_mut().current_user.take() {
            tracing::info!("User {} logged out", username);
            store.persist();
        }
        Ok(SessionInfo { username: None })
    }

    pub fn current_user(&self) -> AppResult<Option<String>> {
        let store = lock(&self.store)?;
        Ok(store.data().current_user.clone())
    }

    pub fn session(&self) -> AppResult<SessionInfo> {
        Ok(SessionInfo {
            username: self.current_user()?,
        })
    }
}
