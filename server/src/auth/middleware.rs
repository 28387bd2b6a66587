//! Identity Middleware

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::AppState;

use super::error::AuthError;
use super::jwt::validate_access_token;

/// Verified caller identity injected into request extensions.
///
/// Only the subject of a validated token. The full caller record is loaded
/// by the permission guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallerIdentity(pub Uuid);

/// Middleware that establishes the caller identity when a token is present.
///
/// - No `Authorization` header: the request continues without identity, and
///   any guard further down rejects it as unauthenticated.
/// - Header present: it must be a valid `Bearer` access token, otherwise the
///   request is rejected here.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/protected", get(handler))
///     .layer(axum::middleware::from_fn_with_state(state, establish_identity))
/// ```
#[tracing::instrument(skip_all)]
pub async fn establish_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(auth_header) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = validate_access_token(token, &state.config.jwt_public_key)?;
    let user_id = claims.user_id()?;

    tracing::debug!(user_id = %user_id, "Caller identity established");
    request.extensions_mut().insert(CallerIdentity(user_id));

    Ok(next.run(request).await)
}
