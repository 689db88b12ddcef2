/// Request authentication primitives
///
/// Parses the `Authorization: Bearer <token>` header, validates the token and
/// produces the [`AuthContext`] that the API's auth layer stores in request
/// extensions.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use taskboard_shared::auth::{jwt::issue_token, middleware::authenticate};
/// use uuid::Uuid;
///
/// let secret = "secret-key-at-least-32-bytes-long";
/// let user_id = Uuid::new_v4();
/// let token = issue_token(user_id, secret).unwrap();
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::AUTHORIZATION,
///     HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
/// );
///
/// let auth = authenticate(&headers, secret).unwrap();
/// assert_eq!(auth.user_id, user_id);
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authentication context added to request extensions
///
/// Handlers extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the token's subject)
    pub user_id: Uuid,
}

impl AuthContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("Missing Authorization Header")]
    MissingCredentials,

    /// Authorization header present but not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("{0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token has expired".to_string()),
            JwtError::InvalidIssuer { .. } => {
                AuthError::InvalidToken("Invalid token issuer".to_string())
            }
            other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
        }
    }
}

/// Extracts the raw token from an `Authorization: Bearer <token>` header
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if the header is absent
/// - `AuthError::InvalidFormat` if it is not valid UTF-8, not a Bearer
///   credential, or the token part is empty
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Invalid Authorization header".to_string()))?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::InvalidFormat("Missing 'Bearer' type in 'Authorization' header".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidFormat(
            "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'".to_string(),
        ));
    }

    Ok(token)
}

/// Authenticates a request from its headers
///
/// Only the token is checked here. Whether the subject still exists in the
/// database is left to the handlers that care (task creation and ownership
/// checks).
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_token(token, secret)?;

    Ok(AuthContext::new(claims.sub))
}
