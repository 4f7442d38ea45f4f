//! Account and session handlers

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::services::auth::{AuthService, CredentialsInput, SessionInfo};
use crate::AppState;

fn service(state: &AppState) -> AuthService {
    AuthService::new(state.store.clone(), state.config.auth.bcrypt_cost)
}

/// Register a new account and log it in
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CredentialsInput>,
) -> AppResult<Json<SessionInfo>> {
    let service = service(&state);
    let session = tokio::task::spawn_blocking(move || service.register(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(session))
}

/// Log in with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsInput>,
) -> AppResult<Json<SessionInfo>> {
    let service = service(&state);
    let session = tokio::task::spawn_blocking(move || service.login(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(session))
}

pub async fn logout(State(state): State<AppState>) -> AppResult<Json<SessionInfo>> {
    Ok(Json(service(&state).logout()?))
}

/// Who is currently logged in
pub async fn session(State(state): State<AppState>) -> AppResult<Json<SessionInfo>> {
    Ok(Json(service(&state).session()?))
}
