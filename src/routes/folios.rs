use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::folios::{AddFolioItemRequest, AddPaymentRequest, FolioView, PaymentReceipt},
    error::AppResult,
    middleware::actor::Actor,
    response::ApiResponse,
    services::folio_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_folio))
        .route("/{id}/items", post(add_item))
        .route("/{id}/payments", post(add_payment))
        .route("/{id}/close", post(close_folio))
        .route("/{id}/void", post(void_folio))
}

#[utoipa::path(
    get,
    path = "/api/folios/{id}",
    params(("id" = Uuid, Path, description = "Folio ID")),
    responses(
        (status = 200, description = "Folio with items, payments, total and balance", body = ApiResponse<FolioView>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Folios"
)]
pub async fn get_folio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FolioView>>> {
    let resp = folio_service::get_folio(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/folios/{id}/items",
    params(("id" = Uuid, Path, description = "Folio ID")),
    request_body = AddFolioItemRequest,
    responses(
        (status = 200, description = "Item posted", body = ApiResponse<FolioView>),
        (status = 400, description = "ValidationError"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "FolioClosed"),
    ),
    tag = "Folios"
)]
pub async fn add_item(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddFolioItemRequest>,
) -> AppResult<Json<ApiResponse<FolioView>>> {
    let resp = folio_service::add_item(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/folios/{id}/payments",
    params(("id" = Uuid, Path, description = "Folio ID")),
    request_body = AddPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, or replayed for a repeated idempotency key", body = ApiResponse<PaymentReceipt>),
        (status = 400, description = "ValidationError"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "FolioClosed or DuplicatePayment"),
    ),
    tag = "Folios"
)]
pub async fn add_payment(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddPaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentReceipt>>> {
    let resp = folio_service::add_payment(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/folios/{id}/close",
    params(("id" = Uuid, Path, description = "Folio ID")),
    responses(
        (status = 200, description = "OPEN -> CLOSED", body = ApiResponse<FolioView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "AlreadyClosed"),
    ),
    tag = "Folios"
)]
pub async fn close_folio(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FolioView>>> {
    let resp = folio_service::close_folio(&state, &actor, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/folios/{id}/void",
    params(("id" = Uuid, Path, description = "Folio ID")),
    responses(
        (status = 200, description = "OPEN -> VOID", body = ApiResponse<FolioView>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "AlreadyClosed"),
    ),
    tag = "Folios"
)]
pub async fn void_folio(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FolioView>>> {
    let resp = folio_service::void_folio(&state, &actor, id).await?;
    Ok(Json(resp))
}
