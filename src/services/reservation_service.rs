use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        DomainResult,
        folio::FolioStatus,
        reservation::{Reservation, ReservationStatus},
        task::StatusEvent,
    },
    dto::reservations::{ReservationList, ReservationView},
    entity::{
        folios::{ActiveModel as FolioActive, Column as FolioCol, Entity as Folios},
        reservations::{ActiveModel as ReservationActive, Column as ResCol, Entity as Reservations},
    },
    error::{AppError, AppResult},
    events::{EventSubject, append_status_event},
    middleware::actor::Actor,
    models::reservation_from_entity,
    response::{ApiResponse, Meta},
    routes::params::{ReservationListQuery, SortOrder},
    state::AppState,
};

pub async fn list_reservations(
    state: &AppState,
    query: ReservationListQuery,
) -> AppResult<ApiResponse<ReservationList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(property_id) = query.property_id {
        condition = condition.add(ResCol::PropertyId.eq(property_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(ResCol::Status.eq(status.as_str()));
    }
    if let Some(date) = query.date {
        condition = condition
            .add(ResCol::CheckInDate.lte(date))
            .add(ResCol::CheckOutDate.gte(date));
    }

    let mut finder = Reservations::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(ResCol::CheckInDate),
        SortOrder::Desc => finder.order_by_desc(ResCol::CheckInDate),
    };
    finder = finder.order_by_asc(ResCol::Code);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| reservation_from_entity(model).map(ReservationView::from))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ok",
        ReservationList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_reservation(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ReservationView>> {
    let model = Reservations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let reservation = reservation_from_entity(model)?;
    Ok(ApiResponse::item("OK", reservation.into()))
}

pub async fn confirm(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<ReservationView>> {
    transition(state, actor, id, Reservation::confirm, "Reservation confirmed").await
}

pub async fn check_in(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<ReservationView>> {
    transition(state, actor, id, Reservation::check_in, "Checked in").await
}

pub async fn check_out(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<ReservationView>> {
    transition(state, actor, id, Reservation::check_out, "Checked out").await
}

pub async fn cancel(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<ReservationView>> {
    transition(state, actor, id, Reservation::cancel, "Reservation cancelled").await
}

pub async fn mark_no_show(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<ReservationView>> {
    transition(state, actor, id, Reservation::mark_no_show, "Marked as no-show").await
}

/// Locks the row, applies `action` to the snapshot and persists the new
/// status with its event. A rejected action rolls back untouched.
async fn transition(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    action: fn(&mut Reservation) -> DomainResult<()>,
    message: &'static str,
) -> AppResult<ApiResponse<ReservationView>> {
    let txn = state.orm.begin().await?;

    let model = Reservations::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut reservation = reservation_from_entity(model.clone())?;
    let from = reservation.status;
    if let Err(err) = action(&mut reservation) {
        tracing::warn!(reservation_id = %id, status = %from, error = %err, "reservation transition rejected");
        return Err(err.into());
    }

    let now = Utc::now();
    let mut active: ReservationActive = model.into();
    active.status = Set(reservation.status.as_str().to_string());
    active.updated_at = Set(now.into());
    active.update(&txn).await?;

    append_status_event(
        &txn,
        EventSubject::Reservation,
        id,
        &StatusEvent {
            status: reservation.status,
            changed_at: now,
            changed_by_user_id: actor.user_id,
        },
    )
    .await?;

    if reservation.status == ReservationStatus::CheckedIn {
        open_folio_if_missing(&txn, &reservation, &state.default_currency, now).await?;
    }

    txn.commit().await?;

    tracing::info!(
        reservation_id = %id,
        code = %reservation.code,
        from = %from,
        to = %reservation.status,
        user_id = %actor.user_id,
        "reservation status changed"
    );

    Ok(ApiResponse::item(message, reservation.into()))
}

async fn open_folio_if_missing(
    txn: &DatabaseTransaction,
    reservation: &Reservation,
    currency: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let existing = Folios::find()
        .filter(FolioCol::ReservationId.eq(reservation.id))
        .count(txn)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let folio_id = Uuid::new_v4();
    FolioActive {
        id: Set(folio_id),
        reservation_id: Set(reservation.id),
        status: Set(FolioStatus::Open.as_str().to_string()),
        currency: Set(currency.to_string()),
        created_at: NotSet,
        updated_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    tracing::debug!(reservation_id = %reservation.id, folio_id = %folio_id, "opened folio at check-in");
    Ok(())
}
