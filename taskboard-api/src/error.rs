/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`; `ApiError` renders itself as a JSON
/// body with the matching status code:
///
/// | Variant | Status | Body |
/// |---|---|---|
/// | `BadRequest`, `ValidationError` | 400 | `{"error": ...}` (first failing field's message) |
/// | `Unauthorized` | 401 | `{"msg": ...}` |
/// | `Forbidden` | 403 | `{"error": ...}` |
/// | `NotFound` | 404 | `{"error": ...}` |
/// | `Conflict` | 409 | `{"error": ...}` |
/// | `InternalError` | 500 | `{"error": ...}` |
///
/// Internal errors carry the underlying database message through to the
/// client. That leaks schema details and is a known issue.
///
/// # Example
///
/// ```
/// use taskboard_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(found: bool) -> ApiResult<Json<Value>> {
///     if !found {
///         return Err(ApiError::NotFound("Task not found".to_string()));
///     }
///     Ok(Json(json!({ "ok": true })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::auth::{authorization::AuthzError, jwt::JwtError, middleware::AuthError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400), e.g. unreadable JSON
    BadRequest(String),

    /// Bad request (400) from field validation
    ValidationError(Vec<ValidationErrorDetail>),

    /// Unauthorized (401): missing/invalid token or bad credentials
    Unauthorized(String),

    /// Forbidden (403): authenticated but not the owner
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409), e.g. duplicate username
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Body of every non-401 error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Body of 401 responses
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub msg: String,
}

impl ApiError {
    /// HTTP status this error renders as
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::Unauthorized(msg) => {
                return (status, Json(AuthErrorResponse { msg })).into_response();
            }
            ApiError::ValidationError(errors) => {
                tracing::debug!(?errors, "Request failed validation");
                errors
                    .into_iter()
                    .next()
                    .map(|e| e.message)
                    .unwrap_or_else(|| "Request validation failed".to_string())
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg
            }
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict(db_err.message().to_string());
                }
                ApiError::InternalError(db_err.message().to_string())
            }
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Convert authentication errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Convert token errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => ApiError::InternalError(msg),
            other => AuthError::from(other).into(),
        }
    }
}

/// Convert ownership errors to API errors
impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotAuthorized => ApiError::Forbidden("Unauthorized".to_string()),
            AuthzError::DatabaseError(err) => err.into(),
        }
    }
}
