use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status given to a task that was created without one.
pub const DEFAULT_TASK_STATUS: &str = "pending";

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Free-form status string, `"pending"` until changed.
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a task. The owner is supplied separately.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl TaskChanges {
    /// Merges these changes into `task`, leaving unset fields untouched.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: 1,
            title: "t".to_string(),
            description: Some("d".to_string()),
            status: DEFAULT_TASK_STATUS.to_string(),
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_is_a_partial_merge() {
        let mut task = sample_task();
        TaskChanges {
            status: Some("done".to_string()),
            ..Default::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.title, "t");
        assert_eq!(task.description.as_deref(), Some("d"));
        assert_eq!(task.status, "done");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_task_serialization_shape() {
        let mut task = sample_task();
        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["due_date"], "2024-05-01");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["user_id"], 1);
        assert!(json["created_at"].is_string());
    }
}
