/// Ownership checks for task mutation
///
/// A task may only be updated or deleted by the user recorded as its owner,
/// and only while that user still exists. User records have no equivalent
/// check: any authenticated caller may update or delete any user.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::authorization::require_task_owner;
/// use taskboard_shared::auth::middleware::AuthContext;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, auth: AuthContext, owner: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = pool.acquire().await?;
/// require_task_owner(&mut conn, &auth, owner).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgConnection;
use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::user::User;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller is not the owner of the resource, or no longer exists
    #[error("Not authorized to access this resource")]
    NotAuthorized,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Pure ownership comparison
pub fn is_owner(auth: &AuthContext, owner_id: Uuid) -> bool {
    auth.user_id == owner_id
}

/// Requires the caller to exist and to own the resource
///
/// # Errors
///
/// - `AuthzError::NotAuthorized` if the token's subject has been deleted or
///   does not match `owner_id`
/// - `AuthzError::DatabaseError` if the user lookup fails
pub async fn require_task_owner(
    conn: &mut PgConnection,
    auth: &AuthContext,
    owner_id: Uuid,
) -> Result<(), AuthzError> {
    if !User::exists(conn, auth.user_id).await? {
        tracing::warn!(user_id = %auth.user_id, "Token subject no longer exists");
        return Err(AuthzError::NotAuthorized);
    }

    if !is_owner(auth, owner_id) {
        tracing::warn!(
            user_id = %auth.user_id,
            owner_id = %owner_id,
            "Caller does not own resource"
        );
        return Err(AuthzError::NotAuthorized);
    }

    Ok(())
}
