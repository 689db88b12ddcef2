/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`jwt`]: Bearer token issuing and validation (HS256, 24h lifetime)
/// - [`middleware`]: Authorization header parsing and the per-request `AuthContext`
/// - [`authorization`]: Task ownership checks
///
/// Passwords are stored and compared as plaintext by the user handlers;
/// nothing in this module hashes them.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{issue_token, validate_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let token = issue_token(user_id, "secret-key-at-least-32-bytes-long")?;
/// let claims = validate_token(&token, "secret-key-at-least-32-bytes-long")?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
