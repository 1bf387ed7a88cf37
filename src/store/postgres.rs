use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, TaskStore, UserStore};
use crate::config::Config;
use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserRecord};

const TASK_COLUMNS: &str = "id, user_id, title, description, status, due_date, created_at";

/// Postgres-backed implementation of both stores.
///
/// Each query checks a connection out of the pool and hands it back when the
/// query future completes or is dropped.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool using the limits from `config`. The statement timeout is
    /// enforced by the server on every connection.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(&config.database_url)?.options([(
            "statement_timeout",
            config.db_statement_timeout.as_millis().to_string(),
        )]);

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
             RETURNING id, name, email",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, StoreError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn create(&self, user_id: i32, task: NewTask) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks (id, user_id, title, description, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(task.title)
            .bind(task.description)
            .bind(task.due_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: i32,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let sql = format!(
            "UPDATE tasks SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                due_date = COALESCE($4, due_date)
             WHERE id = $5 AND user_id = $6
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.status)
            .bind(changes.due_date)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
