/// Bearer token issuing and validation
///
/// Tokens are HS256-signed JWTs whose `sub` claim is the user ID. Every token
/// lives for 24 hours; there is no refresh flow, so clients log in again once
/// a token expires.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let claims = Claims::new(user_id);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim written into and required on every token
pub const ISSUER: &str = "taskboard";

/// Lifetime of an access token
pub fn token_lifetime() -> Duration {
    Duration::days(1)
}

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was signed by someone else
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims
///
/// - `sub`: user ID
/// - `iss`: always [`ISSUER`]
/// - `iat` / `nbf`: issue time
/// - `exp`: issue time + 24h
/// - `jti`: unique token ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Token ID
    pub jti: Uuid,
}

impl Claims {
    /// Creates claims for `user_id` expiring after [`token_lifetime`]
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, token_lifetime())
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration yields already-expired claims, which is what the
    /// expiry tests rely on.
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Signs `claims` with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a 24 hour access token for `user_id`
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::issue_token;
/// use uuid::Uuid;
///
/// let token = issue_token(Uuid::new_v4(), "secret").unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::new(user_id), secret)
}

/// Validates a token and returns its claims
///
/// Verifies the signature, the issuer, `nbf` and `exp`. No leeway is
/// applied to `exp`, so a token is rejected from the second it expires.
///
/// # Errors
///
/// - `JwtError::Expired` once `exp` has passed
/// - `JwtError::InvalidIssuer` for tokens not issued by Taskboard
/// - `JwtError::ValidationError` for malformed tokens or bad signatures
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
