/// Task model and database operations
///
/// A task belongs to the user who created it. Anyone authenticated can read
/// tasks; only the owner may change or delete them (see
/// [`crate::auth::authorization`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT,
///     owner_id UUID NOT NULL
/// );
/// ```
///
/// `owner_id` has no foreign key: deleting a user leaves their tasks behind
/// with a dangling owner.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
/// let task = Task::create(
///     &mut tx,
///     CreateTask {
///         title: "buy milk".to_string(),
///         description: None,
///         owner_id: owner,
///     },
/// )
/// .await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// A task row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4, generated by the server)
    pub id: Uuid,

    /// Task title, never empty when written through the API
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// User who created the task
    pub owner_id: Uuid,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

/// Input for overwriting a task's content
///
/// `description: None` clears the column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
}

impl Task {
    /// Inserts a new task with a freshly generated ID
    pub async fn create(conn: &mut PgConnection, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, title, description, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, owner_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.title)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(conn)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, owner_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(task)
    }

    /// Looks up only the owner of a task
    ///
    /// Locks the row (`FOR UPDATE`) so the ownership decision holds until the
    /// surrounding transaction commits.
    pub async fn find_owner_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT owner_id FROM tasks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(owner)
    }

    /// Lists every task
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>("SELECT id, title, description, owner_id FROM tasks")
            .fetch_all(conn)
            .await?;

        Ok(tasks)
    }

    /// Overwrites title and description
    ///
    /// # Returns
    ///
    /// True if a row was updated
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET title = $2, description = $3 WHERE id = $1")
            .bind(id)
            .bind(data.title)
            .bind(data.description)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
