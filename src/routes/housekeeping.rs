use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::housekeeping::{HousekeepingBoard, StatusEventList, TaskList, TaskView, UpdateTaskRequest},
    error::AppResult,
    middleware::actor::Actor,
    response::ApiResponse,
    routes::params::{BoardQuery, TaskListQuery},
    services::housekeeping_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks))
        .route("/tasks/{id}", put(update_task))
        .route("/tasks/{id}/events", get(task_events))
        .route("/board", get(board))
}

#[utoipa::path(
    get,
    path = "/api/housekeeping/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "List housekeeping tasks with overdue flag", body = ApiResponse<TaskList>),
    ),
    tag = "Housekeeping"
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<ApiResponse<TaskList>>> {
    let resp = housekeeping_service::list_tasks(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/housekeeping/board",
    params(BoardQuery),
    responses(
        (status = 200, description = "Board for one property and day, ordered by room number", body = ApiResponse<HousekeepingBoard>),
    ),
    tag = "Housekeeping"
)]
pub async fn board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<ApiResponse<HousekeepingBoard>>> {
    let resp = housekeeping_service::board(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/housekeeping/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated; a status change is appended to its history", body = ApiResponse<TaskView>),
        (status = 400, description = "ValidationError"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Housekeeping"
)]
pub async fn update_task(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    let resp = housekeeping_service::update_task(&state, &actor, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/housekeeping/tasks/{id}/events",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Status history, oldest first", body = ApiResponse<StatusEventList>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Housekeeping"
)]
pub async fn task_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StatusEventList>>> {
    let resp = housekeeping_service::task_events(&state, id).await?;
    Ok(Json(resp))
}
