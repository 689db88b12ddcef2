/// Database models for Taskboard
///
/// # Models
///
/// - `user`: Registered users and their (plaintext) credentials
/// - `task`: Tasks, each owned by the user who created it
///
/// Query functions take `&mut PgConnection`; pass `&mut *conn` for a pooled
/// connection or `&mut *tx` for a transaction.

pub mod task;
pub mod user;
