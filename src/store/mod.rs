//! Persistence for users and tasks.
//!
//! Handlers only talk to the [`UserStore`] and [`TaskStore`] traits. Every task
//! operation takes the owner's id, so there is no way to reach a task without
//! naming who is asking for it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserRecord};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email already exists.
    #[error("email already in use")]
    EmailTaken,
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            // 23505: unique_violation
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                StoreError::EmailTaken
            }
            _ => StoreError::Database(error.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts a user. Fails with [`StoreError::EmailTaken`] if the email is in use.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All of the user's tasks, most recently created first.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, StoreError>;

    async fn create(&self, user_id: i32, task: NewTask) -> Result<Task, StoreError>;

    /// Applies `changes` to the task matching both `id` and `user_id`.
    /// Returns `None` when no such task exists.
    async fn update(
        &self,
        id: Uuid,
        user_id: i32,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes the task matching both `id` and `user_id`. Returns whether a row was removed.
    async fn delete(&self, id: Uuid, user_id: i32) -> Result<bool, StoreError>;
}
