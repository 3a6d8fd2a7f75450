use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        housekeeping::StatusEventList,
        maintenance::{TicketList, TicketView, UpdateTicketRequest},
    },
    error::AppResult,
    middleware::actor::Actor,
    response::ApiResponse,
    routes::params::{PhotoQuery, TicketListQuery},
    services::maintenance_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(list_tickets))
        .route("/tickets/{id}", put(update_ticket))
        .route("/tickets/{id}/events", get(ticket_events))
        .route("/tickets/{id}/photos", post(attach_photo))
}

#[utoipa::path(
    get,
    path = "/api/maintenance/tickets",
    params(TicketListQuery),
    responses(
        (status = 200, description = "List maintenance tickets with overdue flag", body = ApiResponse<TicketList>),
    ),
    tag = "Maintenance"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketListQuery>,
) -> AppResult<Json<ApiResponse<TicketList>>> {
    let resp = maintenance_service::list_tickets(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/maintenance/tickets/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Ticket updated; a status change is appended to its history", body = ApiResponse<TicketView>),
        (status = 400, description = "ValidationError"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Maintenance"
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketRequest>,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let resp = maintenance_service::update_ticket(&state, &actor, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/maintenance/tickets/{id}/events",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Status history, oldest first", body = ApiResponse<StatusEventList>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Maintenance"
)]
pub async fn ticket_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StatusEventList>>> {
    let resp = maintenance_service::ticket_events(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/maintenance/tickets/{id}/photos",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        PhotoQuery
    ),
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Photo stored and its URL attached", body = ApiResponse<TicketView>),
        (status = 400, description = "Empty upload"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Upload failed"),
    ),
    tag = "Maintenance"
)]
pub async fn attach_photo(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Query(query): Query<PhotoQuery>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let resp =
        maintenance_service::attach_photo(&state, &actor, id, query.filename.as_deref(), body)
            .await?;
    Ok(Json(resp))
}
