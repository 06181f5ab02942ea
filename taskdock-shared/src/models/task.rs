/// Task model and database operations
///
/// This module provides the Task model and its single-row store operations.
/// Tasks are created by an authenticated user, who becomes their immutable
/// owner; only title and status are ever mutated afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     status TEXT NOT NULL,
///     owner TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The owner column is a plain username back-reference, not a foreign key;
/// NULL marks legacy rows that predate ownership and are inaccessible through
/// the API.
///
/// # Example
///
/// ```no_run
/// use taskdock_shared::models::task::{CreateTask, Task};
/// use taskdock_shared::db::pool::create_pool;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool("postgresql://localhost/taskdock", 10).await?;
///
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         title: "buy milk".to_string(),
///         status: "pending".to_string(),
///         owner: "alice".to_string(),
///     },
/// )
/// .await?;
///
/// let mine = Task::list_by_owner(&pool, "alice").await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model representing a tracked task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Task status (free-form, e.g. "pending", "done")
    pub status: String,

    /// Username of the owning account
    ///
    /// None for legacy rows created before ownership existed; such tasks are
    /// not reachable through the authenticated API.
    pub owner: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The owner is set by the server from the authenticated identity; it is not
/// part of any client payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Task status
    pub status: String,

    /// Owning username (the creator's identity)
    pub owner: String,
}

/// Input for updating a task
///
/// All fields are optional; only supplied fields change. There is
/// deliberately no owner field here: ownership can never be transferred or
/// erased by a client, and an `owner` key in an incoming payload is dropped
/// during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New status
    pub status: Option<String>,
}

impl UpdateTask {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }

    /// True when applying this update to `task` would change at least one
    /// stored field
    pub fn would_change(&self, task: &Task) -> bool {
        let title_changes = self
            .title
            .as_ref()
            .map(|t| t != &task.title)
            .unwrap_or(false);
        let status_changes = self
            .status
            .as_ref()
            .map(|s| s != &task.status)
            .unwrap_or(false);

        title_changes || status_changes
    }
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, status, owner)
            VALUES ($1, $2, $3)
            RETURNING id, title, status, owner, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.status)
        .bind(data.owner)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// # Returns
    ///
    /// The task if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, owner, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by `owner`
    ///
    /// Order is store-native; no ordering contract is offered to clients.
    /// Rows with a NULL owner never match.
    pub async fn list_by_owner(pool: &PgPool, owner: &str) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, owner, created_at, updated_at
            FROM tasks
            WHERE owner = $1
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update to a task
    ///
    /// Absent fields retain their prior value; the owner column is never
    /// touched. Returns the updated row, or None if the task disappeared
    /// between the caller's existence check and this statement (the accepted
    /// fetch-then-act race).
    pub async fn apply_update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, status, owner, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// true if a row was removed, false if the id no longer exists. Deletion
    /// is not idempotent: a second delete of the same id reports false and
    /// the caller maps that to NotFound.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
