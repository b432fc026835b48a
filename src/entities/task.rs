//! Task record with status/priority enums

use crate::core::owned::Owned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task completion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// A task owned by exactly one user.
///
/// Visible and mutable only through its owner's identity; the owner
/// reference is stamped by the repository, never taken from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        owner_id: Uuid,
        title: String,
        description: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            description,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Task {
    fn collection_name() -> &'static str {
        "tasks"
    }

    fn record_name() -> &'static str {
        "Task"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn set_owner(&mut self, owner_id: Uuid) {
        self.owner_id = owner_id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let task = Task::new(Uuid::new_v4(), "Write report".to_string(), String::new(), None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_status_serializes_as_plain_variant_name() {
        assert_eq!(
            serde_json::to_value(TaskStatus::Pending).unwrap(),
            serde_json::json!("Pending")
        );
        assert_eq!(
            serde_json::to_value(TaskPriority::Medium).unwrap(),
            serde_json::json!("Medium")
        );
    }

    #[test]
    fn test_out_of_domain_status_fails_deserialization() {
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("Archived")).is_err());
        assert!(serde_json::from_value::<TaskPriority>(serde_json::json!("Urgent")).is_err());
        // No silent coercion of casing either.
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("pending")).is_err());
    }

    #[test]
    fn test_task_json_uses_camel_case_keys() {
        let task = Task::new(Uuid::new_v4(), "Write report".to_string(), String::new(), None);
        let json = serde_json::to_value(&task).unwrap();

        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("owner_id").is_none());
    }
}
