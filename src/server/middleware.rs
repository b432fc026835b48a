//! Bearer token authentication middleware
//!
//! Per-request flow: extract the `Authorization: Bearer` header, verify the
//! token, and bind the resolved user id into the request extensions. Any
//! failure short-circuits with 401 before the downstream handler runs; a
//! missing header is never treated as anonymous access.
//!
//! The [`AuthUser`] extension is the only identity source handlers may
//! trust. Identity is never taken from a request body or query parameter.

use crate::core::error::ApiError;
use crate::server::state::AppState;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Caller identity resolved from a verified token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

    let user_id = state.tokens.verify(token)?;

    request.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(request).await)
}
