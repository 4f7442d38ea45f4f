//! Session middleware
//!
//! Gates item and stock routes behind the blob's active user

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::store::lock;
use crate::AppState;

/// Username of the active session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser(pub String);

/// Reject the request unless someone is logged in
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let current = match active_user(&state) {
        Ok(current) => current,
        Err(e) => return e.into_response(),
    };

    match current {
        Some(username) => {
            request.extensions_mut().insert(SessionUser(username));
            next.run(request).await
        }
        None => unauthorized_response("Log in to continue"),
    }
}

fn active_user(state: &AppState) -> AppResult<Option<String>> {
    let store = lock(&state.store)?;
    Ok(store.data().current_user.clone())
}

fn unauthorized_response(message: &str) -> Response {
    AppError::Unauthorized {
        message: message.to_string(),
        message_es: "Debes iniciar sesión.".to_string(),
    }
    .into_response()
}

/// Extractor for the logged-in user
/// Use this in handlers behind `session_middleware`
#[derive(Clone, Debug)]
pub struct CurrentUser(pub SessionUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| unauthorized_response("Authentication required"))
    }
}
