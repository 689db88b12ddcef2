/// Task endpoints
///
/// All routes require a bearer token.
///
/// - `GET /task` - List every task
/// - `POST /task` - Create a task owned by the caller
/// - `GET /task/:id` - Fetch one task
/// - `PUT /task/:id` - Overwrite title/description (owner only)
/// - `DELETE /task/:id` - Delete (owner only)
///
/// For update and delete, a missing task yields 404 before ownership is
/// checked, and ownership failures yield 403.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    routes::{parse_id, users::MessageResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{authorization::require_task_owner, middleware::AuthContext},
    models::{
        task::{CreateTask, Task, UpdateTask},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

const TASK_NOT_FOUND: &str = "Task not found";

/// Body of `POST /task` and `PUT /task/:id`
///
/// A `null` title is rejected like a missing one. Any other field (an
/// `owner_id`, say) is ignored; the owner always comes from the token.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[serde(default)]
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `POST /task`
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub message: String,

    #[serde(rename = "taskId")]
    pub task_id: Uuid,
}

/// `GET /task`
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let mut conn = state.db.acquire().await?;
    let tasks = Task::list(&mut conn).await?;

    tracing::debug!(user_id = %auth.user_id, count = tasks.len(), "Listed tasks");
    Ok(Json(tasks))
}

/// `GET /task/:id`
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_id(&task_id, TASK_NOT_FOUND)?;

    let mut conn = state.db.acquire().await?;
    let task = Task::find_by_id(&mut conn, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(Json(task))
}

/// `POST /task`
///
/// # Errors
///
/// - `400 Bad Request`: title missing or empty
/// - `404 Not Found`: the token's user no longer exists
/// - `500 Internal Server Error`: database failure (transaction rolled back)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<TaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    let mut tx = state.db.begin().await?;

    if !User::exists(&mut tx, auth.user_id).await? {
        tracing::warn!(user_id = %auth.user_id, "Task creation by unknown user");
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let task = Task::create(
        &mut tx,
        CreateTask {
            title: req.title.unwrap_or_default(),
            description: req.description,
            owner_id: auth.user_id,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %auth.user_id, task_id = %task.id, "Task created");
    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created successfully".to_string(),
            task_id: task.id,
        }),
    ))
}

/// `PUT /task/:id`
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
    ValidatedJson(req): ValidatedJson<TaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = parse_id(&task_id, TASK_NOT_FOUND)?;

    let mut tx = state.db.begin().await?;

    let owner_id = Task::find_owner_for_update(&mut tx, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    require_task_owner(&mut tx, &auth, owner_id).await?;

    Task::update(
        &mut tx,
        task_id,
        UpdateTask {
            title: req.title.unwrap_or_default(),
            description: req.description,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %auth.user_id, task_id = %task_id, "Task updated");
    Ok(MessageResponse::new("Task updated successfully"))
}

/// `DELETE /task/:id`
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = parse_id(&task_id, TASK_NOT_FOUND)?;

    let mut tx = state.db.begin().await?;

    let owner_id = Task::find_owner_for_update(&mut tx, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    require_task_owner(&mut tx, &auth, owner_id).await?;

    Task::delete(&mut tx, task_id).await?;
    tx.commit().await?;

    tracing::info!(user_id = %auth.user_id, task_id = %task_id, "Task deleted");
    Ok(MessageResponse::new("Task deleted successfully"))
}
