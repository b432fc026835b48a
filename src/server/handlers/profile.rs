//! Profile handlers (`/me`)

use crate::core::error::ApiError;
use crate::entities::user::{ProfileUpdate, UserProfile};
use crate::server::extract::ValidJson;
use crate::server::middleware::AuthUser;
use crate::server::state::AppState;
use axum::Extension;
use axum::extract::State;
use axum::response::Json;

/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .credentials
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserProfile::from(&user)))
}

/// PUT /api/v1/me
pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    ValidJson(update): ValidJson<ProfileUpdate>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.credentials.update_profile(&user_id, update).await?;

    Ok(Json(UserProfile::from(&user)))
}
