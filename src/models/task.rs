//! Task model returned by the list endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Task lifecycle status, stored as text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    /// Sheet the task belongs to, when scoped.
    pub sheet_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: Uuid::nil(),
            sheet_id: None,
            title: "Ship it".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("sheetId").is_some());
    }
}
