use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserRecord, DEFAULT_TASK_STATUS};

#[derive(Default)]
struct Tables {
    users: HashMap<i32, UserRecord>,
    next_user_id: i32,
    /// Kept in insertion order.
    tasks: Vec<Task>,
}

/// In-memory implementation of both stores, for tests and database-less runs.
///
/// Locks are only held for the duration of a single operation and never
/// across an await point.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Database("in-memory store lock poisoned".into()))
    }

    /// Number of stored users. Used by tests to check that nothing was inserted.
    pub fn user_count(&self) -> usize {
        self.lock().map(|t| t.users.len()).unwrap_or(0)
    }

    /// Number of stored tasks across all users.
    pub fn task_count(&self) -> usize {
        self.lock().map(|t| t.tasks.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken);
        }

        tables.next_user_id += 1;
        let record = UserRecord {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        tables.users.insert(record.id, record.clone());
        Ok(record.into_public())
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, StoreError> {
        let tables = self.lock()?;
        // Newest insertion first, then a stable sort keeps that order for equal timestamps.
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create(&self, user_id: i32, task: NewTask) -> Result<Task, StoreError> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::Database(format!(
                "tasks.user_id {} references a missing user",
                user_id
            )));
        }

        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: task.title,
            description: task.description,
            status: DEFAULT_TASK_STATUS.to_string(),
            due_date: task.due_date,
            created_at: Utc::now(),
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: i32,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.lock()?;
        match tables
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
        {
            Some(task) => {
                changes.apply_to(task);
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tables.tasks.len() < before)
    }
}
