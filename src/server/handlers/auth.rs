//! Signup and login handlers

use crate::core::error::ApiError;
use crate::entities::user::UserProfile;
use crate::server::extract::ValidJson;
use crate::server::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for both signup and login: the profile plus a fresh token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    // The length rule alone lets "   " through; the stored name must be
    // non-empty after trimming.
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }

    let user = state
        .credentials
        .create_user(name, &req.email, &req.password)
        .await?;

    let token = state.tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserProfile::from(&user),
            token,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .credentials
        .verify_credentials(&req.email, &req.password)
        .await?;

    let token = state.tokens.issue(&user.id)?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
        token,
    }))
}
