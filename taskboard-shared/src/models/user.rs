/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```
///
/// Passwords are stored exactly as submitted and compared verbatim at login.
/// The row is serialized whole, so listing or fetching users exposes the
/// password column to the caller.
///
/// All queries take `&mut PgConnection` so they run on either a pooled
/// connection or an open transaction.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
/// let user = User::create(
///     &mut tx,
///     CreateUser {
///         username: "al".to_string(),
///         password: "p1".to_string(),
///     },
/// )
/// .await?;
/// tx.commit().await?;
///
/// let mut conn = pool.acquire().await?;
/// let found = User::find_by_username(&mut conn, "al").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4, generated by the server)
    pub id: Uuid,

    /// Login name, unique across all users
    pub username: String,

    /// Plaintext password
    pub password: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

/// Input for overwriting a user
///
/// Both columns are always written. `None` binds SQL NULL, which the
/// NOT NULL constraints reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl User {
    /// Inserts a new user with a freshly generated ID
    ///
    /// # Errors
    ///
    /// Returns a unique-violation database error if the username is taken
    /// by a concurrent insert that slipped past the caller's lookup.
    pub async fn create(conn: &mut PgConnection, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, password
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.username)
        .bind(data.password)
        .fetch_one(conn)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Finds a user by username (exact, case-sensitive match)
    pub async fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Checks whether a user with this ID exists
    pub async fn exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await?;

        Ok(exists)
    }

    /// Checks whether a username is already registered
    pub async fn username_taken(conn: &mut PgConnection, username: &str) -> Result<bool, sqlx::Error> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(conn)
                .await?;

        Ok(taken)
    }

    /// Lists every user, passwords included
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>("SELECT id, username, password FROM users")
            .fetch_all(conn)
            .await?;

        Ok(users)
    }

    /// Overwrites username and password
    ///
    /// # Returns
    ///
    /// True if a row was updated, false if the ID matched nothing
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET username = $2, password = $3 WHERE id = $1")
            .bind(id)
            .bind(data.username)
            .bind(data.password)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by ID
    ///
    /// Tasks owned by the user are left in place.
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks a login attempt against the stored password
    ///
    /// Plain string equality: case-sensitive, no hashing.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
