//! Task CRUD handlers
//!
//! Thin orchestration over the ownership-scoped repository. The caller's
//! identity comes exclusively from the auth middleware extension; request
//! payloads never name an owner.
//!
//! Payloads are parsed field-by-field from JSON so that partial updates can
//! distinguish "field absent" (keep the prior value) from "field null"
//! (clear the due date), and so enum values are validated against their
//! domain before anything is persisted.

use crate::core::error::ApiError;
use crate::entities::task::{Task, TaskPriority, TaskStatus};
use crate::server::extract::JsonPayload;
use crate::server::middleware::AuthUser;
use crate::server::state::AppState;
use axum::Extension;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

fn parse_status(value: &Value) -> Result<TaskStatus, ApiError> {
    serde_json::from_value(value.clone())
        .map_err(|_| ApiError::Validation(format!("Invalid status: {}", value)))
}

fn parse_priority(value: &Value) -> Result<TaskPriority, ApiError> {
    serde_json::from_value(value.clone())
        .map_err(|_| ApiError::Validation(format!("Invalid priority: {}", value)))
}

/// Parse a due date value. `null` and the empty string clear the date;
/// otherwise an RFC 3339 timestamp or a plain `YYYY-MM-DD` date is accepted.
fn parse_due_date(value: &Value) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&Utc)));
            }
            if let Ok(date) = s.parse::<NaiveDate>() {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Some(dt.and_utc()));
                }
            }
            Err(ApiError::Validation(format!("Invalid due date: {}", s)))
        }
        other => Err(ApiError::Validation(format!("Invalid due date: {}", other))),
    }
}

fn parse_title(value: &Value) -> Result<String, ApiError> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation("Title is required".to_string()))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    // An unparseable id can't match any record; report it like one.
    id.parse::<Uuid>()
        .map_err(|_| ApiError::NotFound("Task not found".to_string()))
}

/// GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks.list(&user_id).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    JsonPayload(payload): JsonPayload<Value>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = parse_title(
        payload
            .get("title")
            .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?,
    )?;

    let description = payload
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let due_date = match payload.get("dueDate") {
        Some(value) => parse_due_date(value)?,
        None => None,
    };

    let mut task = Task::new(user_id, title, description, due_date);

    if let Some(value) = payload.get("status") {
        task.status = parse_status(value)?;
    }
    if let Some(value) = payload.get("priority") {
        task.priority = parse_priority(value)?;
    }

    let created = state.tasks.create(&user_id, task).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = state.tasks.get(&user_id, &id).await?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update: fields absent from the payload keep their prior value,
/// `"dueDate": null` clears the due date.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload<Value>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    let task = state
        .tasks
        .update_with(&user_id, &id, |task| {
            if let Some(value) = payload.get("title") {
                task.title = parse_title(value)?;
            }
            if let Some(value) = payload.get("description") {
                task.description = value
                    .as_str()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
            }
            if let Some(value) = payload.get("status") {
                task.status = parse_status(value)?;
            }
            if let Some(value) = payload.get("priority") {
                task.priority = parse_priority(value)?;
            }
            if let Some(value) = payload.get("dueDate") {
                task.due_date = parse_due_date(value)?;
            }
            Ok(())
        })
        .await?;

    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.tasks.delete(&user_id, &id).await?;

    Ok(Json(json!({ "message": "Task removed" })))
}
