/// User endpoints
///
/// - `GET /user` - List users (public)
/// - `POST /user` - Register (public)
/// - `POST /user/login` - Exchange credentials for a bearer token (public)
/// - `GET /user/:id` - Fetch one user
/// - `PUT /user/:id` - Overwrite username and password
/// - `DELETE /user/:id` - Delete a user
///
/// Known issues kept for API compatibility:
/// - passwords are stored and compared in plaintext and returned by the
///   read endpoints
/// - update and delete accept any valid token, not just the target user's

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{AppJson, ValidatedJson},
    routes::parse_id,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, middleware::AuthContext},
    models::user::{CreateUser, UpdateUser, User},
};
use uuid::Uuid;
use validator::Validate;

const USER_EXISTS: &str = "User already exists";
const BAD_CREDENTIALS: &str = "Bad username or password";
const USER_NOT_FOUND: &str = "User not found";

/// Registration request
///
/// Absent, `null` and empty values are all rejected the same way.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        required(message = "Username and password are required"),
        length(min = 1, message = "Username and password are required")
    )]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Username and password are required"),
        length(min = 1, message = "Username and password are required")
    )]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            username: req.username.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        }
    }
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub userid: Uuid,
}

/// Login request
///
/// Fields are optional: a missing value simply fails authentication.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 24 hour bearer token
    pub access_token: String,
}

/// Update request
///
/// Both columns are overwritten with whatever is supplied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUser {
            username: req.username,
            password: req.password,
        }
    }
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// `GET /user`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let mut conn = state.db.acquire().await?;
    let users = User::list(&mut conn).await?;

    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// `POST /user`
///
/// # Errors
///
/// - `400 Bad Request`: username or password missing/empty
/// - `409 Conflict`: username already registered
/// - `500 Internal Server Error`: database failure (transaction rolled back)
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreateUserResponse>)> {
    let data = CreateUser::from(req);
    let mut tx = state.db.begin().await?;

    if User::username_taken(&mut tx, &data.username).await? {
        tracing::info!(username = %data.username, "Registration rejected: username taken");
        return Err(ApiError::Conflict(USER_EXISTS.to_string()));
    }

    let user = User::create(&mut tx, data)
        .await
        .map_err(registration_error)?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(CreateUserResponse { userid: user.id })))
}

/// A concurrent registration can slip past the username check and hit the
/// unique constraint; report it like the check would have.
fn registration_error(err: sqlx::Error) -> ApiError {
    match ApiError::from(err) {
        ApiError::Conflict(detail) => {
            tracing::info!(%detail, "Registration rejected: username taken");
            ApiError::Conflict(USER_EXISTS.to_string())
        }
        other => other,
    }
}

/// `POST /user/login`
///
/// Unknown usernames and wrong passwords produce the same 401 body.
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    };

    let mut conn = state.db.acquire().await?;
    let user = User::find_by_username(&mut conn, &username).await?;
    drop(conn);

    let user = match user {
        Some(user) if user.password_matches(&password) => user,
        _ => {
            tracing::info!(username = %username, "Login failed");
            return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }
    };

    let access_token = jwt::issue_token(user.id, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse { access_token }))
}

/// `GET /user/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user_id = parse_id(&user_id, USER_NOT_FOUND)?;

    let mut conn = state.db.acquire().await?;
    let user = User::find_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

/// `PUT /user/:id`
///
/// Succeeds whether or not the ID matched a row; an ID that isn't a UUID
/// matches nothing. Omitted fields are written as NULL, which the schema
/// rejects with a 500 when a row matches.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    const UPDATED: &str = "User updated successfully";

    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        tracing::debug!(caller = %auth.user_id, user_id = %user_id, "Update matched no user");
        return Ok(MessageResponse::new(UPDATED));
    };

    let mut tx = state.db.begin().await?;
    let updated = User::update(&mut tx, user_id, req.into()).await?;
    tx.commit().await?;

    tracing::info!(
        caller = %auth.user_id,
        user_id = %user_id,
        updated,
        "User updated"
    );
    Ok(MessageResponse::new(UPDATED))
}

/// `DELETE /user/:id`
///
/// Unconditional: a missing or malformed ID still succeeds. Tasks owned by
/// the deleted user are kept.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    const DELETED: &str = "User deleted successfully";

    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        tracing::debug!(caller = %auth.user_id, user_id = %user_id, "Delete matched no user");
        return Ok(MessageResponse::new(DELETED));
    };

    let mut tx = state.db.begin().await?;
    let deleted = User::delete(&mut tx, user_id).await?;
    tx.commit().await?;

    tracing::info!(
        caller = %auth.user_id,
        user_id = %user_id,
        deleted,
        "User deleted"
    );
    Ok(MessageResponse::new(DELETED))
}
