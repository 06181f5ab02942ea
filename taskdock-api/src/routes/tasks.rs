/// Task CRUD endpoints
///
/// This module is the task access controller: every handler walks the same
/// per-request pipeline (authenticate in middleware, then validate,
/// authorize, execute, respond) and any step short-circuits to an error
/// response.
///
/// # Endpoints
///
/// - `POST /tasks` - Create a task (owner = authenticated identity)
/// - `GET /tasks` - List the caller's tasks
/// - `GET /tasks/:id` - Fetch one task
/// - `PUT /tasks/:id` - Partially update a task
/// - `DELETE /tasks/:id` - Delete a task
///
/// # Authorization
///
/// Existence is checked before ownership: a non-owner gets 404 for a missing
/// id and 403 for someone else's task. That reveals task existence to
/// non-owners; it is the documented policy, kept deliberately.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdock_shared::{
    auth::{middleware::AuthContext, ownership::ensure_owner},
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
///
/// There is no owner field; the server sets the owner from the authenticated
/// identity, and any owner key in the payload is dropped during
/// deserialization. Fields are optional at the serde layer so a missing
/// field surfaces as a structured validation error listing every violation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub title: Option<String>,

    /// Task status
    #[validate(
        required(message = "status is required"),
        length(min = 1, message = "status must not be empty")
    )]
    pub status: Option<String>,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    /// Confirmation message
    pub message: String,

    /// New task ID
    pub id: String,
}

/// Update task request
///
/// Partial merge: only supplied fields change. Supplied fields must be
/// non-empty. As with creation, ownership is not client-settable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,

    /// New status
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: Option<String>,
}

/// Message-only response for update/delete outcomes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

/// Task wire representation
///
/// The owner serializes under the `user` key; null for legacy unowned rows
/// (which are only ever visible through store-level access, never this API).
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: String,

    /// Task title
    pub title: String,

    /// Task status
    pub status: String,

    /// Owning username
    pub user: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title,
            status: task.status,
            user: task.owner,
        }
    }
}

/// Parses a path segment into a task id
///
/// # Errors
///
/// Returns `ApiError::MalformedId` when the segment is not a syntactically
/// valid identifier for the store.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId("Invalid task ID format".to_string()))
}

/// Fetches a task and checks the caller owns it
///
/// Existence first, then ownership; see the module docs for why the order
/// matters.
async fn find_owned_task(state: &AppState, raw_id: &str, username: &str) -> ApiResult<Task> {
    let id = parse_task_id(raw_id)?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    ensure_owner(&task, username)?;

    Ok(task)
}

/// Create a new task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "buy milk", "status": "pending" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Task created", "id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty title or status
/// - `401 Unauthorized`: missing, invalid, or expired token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    req.validate()?;

    // Owner is always the creator; nothing a client sends can override it
    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title.unwrap_or_default(),
            status: req.status.unwrap_or_default(),
            owner: auth.username,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created".to_string(),
            id: task.id.to_string(),
        }),
    ))
}

/// List the caller's tasks
///
/// Returns only tasks whose owner equals the authenticated identity, in
/// store-native order.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_by_owner(&state.db, &auth.username).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Fetch a single task
///
/// # Errors
///
/// - `400 Bad Request`: id is not a valid identifier
/// - `401 Unauthorized`: missing, invalid, or expired token
/// - `403 Forbidden`: task exists but belongs to someone else
/// - `404 Not Found`: no task with that id
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task = find_owned_task(&state, &raw_id, &auth.username).await?;

    Ok(Json(task.into()))
}

/// Partially update a task
///
/// Only supplied fields change; absent fields retain their prior value. Both
/// outcomes are 200s distinguished only by the message: "Task updated" when
/// at least one field changed, "Task unchanged" when the payload matched the
/// stored values or was empty.
///
/// # Errors
///
/// Same as `get_task`, plus `400 Bad Request` for empty supplied fields.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    let task = find_owned_task(&state, &raw_id, &auth.username).await?;

    let update = UpdateTask {
        title: req.title,
        status: req.status,
    };

    if !update.would_change(&task) {
        return Ok(Json(MessageResponse {
            message: "Task unchanged".to_string(),
        }));
    }

    // The row can vanish between the fetch above and this statement; that
    // race is accepted and surfaces as NotFound.
    Task::apply_update(&state.db, task.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(MessageResponse {
        message: "Task updated".to_string(),
    }))
}

/// Delete a task
///
/// Deletion is not idempotent across calls: the first delete succeeds, a
/// second delete of the same id returns 404.
///
/// # Errors
///
/// Same as `get_task`.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let task = find_owned_task(&state, &raw_id, &auth.username).await?;

    let removed = Task::delete(&state.db, task.id).await?;
    if !removed {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
