use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    domain::views::DashboardSummary,
    dto::dashboard::{OccupancySeries, RevenueSeries},
    error::AppResult,
    response::ApiResponse,
    routes::params::{DashboardQuery, SeriesQuery},
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(summary))
        .route("/revenue", get(revenue))
        .route("/occupancy", get(occupancy))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Arrivals, departures, in-house and overdue counts", body = ApiResponse<DashboardSummary>),
    ),
    tag = "Dashboard"
)]
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let resp = dashboard_service::summary(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/revenue",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Charges per day, zero-filled", body = ApiResponse<RevenueSeries>),
        (status = 400, description = "ValidationError"),
    ),
    tag = "Dashboard"
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> AppResult<Json<ApiResponse<RevenueSeries>>> {
    let resp = dashboard_service::revenue(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/occupancy",
    params(SeriesQuery),
    responses(
        (status = 200, description = "Occupied rooms per night, zero-filled", body = ApiResponse<OccupancySeries>),
        (status = 400, description = "ValidationError"),
    ),
    tag = "Dashboard"
)]
pub async fn occupancy(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> AppResult<Json<ApiResponse<OccupancySeries>>> {
    let resp = dashboard_service::occupancy(&state, query).await?;
    Ok(Json(resp))
}
