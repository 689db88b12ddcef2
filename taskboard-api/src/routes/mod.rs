/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: Registration, login and user CRUD (`/user`)
/// - `tasks`: Task CRUD with ownership checks (`/task`)

pub mod health;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};
use uuid::Uuid;

/// Parses a resource ID taken from the path
///
/// An ID that isn't a UUID cannot match any row, so it is reported with the
/// resource's not-found message.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(not_found.to_string()))
}
