use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::reservations::{ReservationList, ReservationView},
    error::AppResult,
    middleware::actor::Actor,
    response::ApiResponse,
    routes::params::ReservationListQuery,
    services::reservation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservations))
        .route("/{id}", get(get_reservation))
        .route("/{id}/confirm", post(confirm_reservation))
        .route("/{id}/checkin", post(check_in))
        .route("/{id}/checkout", post(check_out))
        .route("/{id}/cancel", post(cancel_reservation))
        .route("/{id}/no-show", post(mark_no_show))
}

#[utoipa::path(
    get,
    path = "/api/reservations",
    params(ReservationListQuery),
    responses(
        (status = 200, description = "List reservations", body = ApiResponse<ReservationList>),
    ),
    tag = "Reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let resp = reservation_service::list_reservations(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation with allowed actions", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::get_reservation(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/confirm",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "HOLD -> CONFIRMED", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "InvalidTransition"),
    ),
    tag = "Reservations"
)]
pub async fn confirm_reservation(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::confirm(&state, &actor, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/checkin",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "CONFIRMED -> CHECKED_IN; opens a folio if none exists", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "InvalidTransition"),
    ),
    tag = "Reservations"
)]
pub async fn check_in(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::check_in(&state, &actor, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/checkout",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "CHECKED_IN -> CHECKED_OUT", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "InvalidTransition"),
    ),
    tag = "Reservations"
)]
pub async fn check_out(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::check_out(&state, &actor, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/cancel",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "HOLD or CONFIRMED -> CANCELLED", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "InvalidTransition"),
    ),
    tag = "Reservations"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::cancel(&state, &actor, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/no-show",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "CONFIRMED -> NO_SHOW", body = ApiResponse<ReservationView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "InvalidTransition"),
    ),
    tag = "Reservations"
)]
pub async fn mark_no_show(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReservationView>>> {
    let resp = reservation_service::mark_no_show(&state, &actor, id).await?;
    Ok(Json(resp))
}
