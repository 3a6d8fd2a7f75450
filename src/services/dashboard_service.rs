use chrono::{NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        DomainError, DomainResult,
        dates::{DEFAULT_WINDOW_DAYS, date_window, trailing_window},
        folio::{FolioStatus, sum_amounts},
        reservation::ReservationStatus,
        task::{HousekeepingStatus, MaintenanceStatus},
        views::{DashboardSummary, dashboard_summary, occupancy_by_date, revenue_by_date},
    },
    dto::dashboard::{OccupancySeries, RevenueSeries},
    entity::{
        folio_items::{self, Column as ItemCol, Entity as FolioItems},
        folios::{self, Column as FolioCol},
        housekeeping_tasks::{Column as TaskCol, Entity as HousekeepingTasks},
        maintenance_tickets::{Column as TicketCol, Entity as MaintenanceTickets},
        reservations::{Column as ResCol, Entity as Reservations},
        rooms::{Column as RoomCol, Entity as Rooms},
    },
    error::AppResult,
    models::{folio_item_from_entity, reservation_from_entity, task_from_entity, ticket_from_entity},
    response::{ApiResponse, Meta},
    routes::params::{DashboardQuery, SeriesQuery},
    state::AppState,
};

/// Longest series the dashboard will compute.
pub const MAX_WINDOW_DAYS: u32 = 92;

pub async fn summary(
    state: &AppState,
    query: DashboardQuery,
) -> AppResult<ApiResponse<DashboardSummary>> {
    let today = query.date.unwrap_or_else(|| state.today());
    let now = Utc::now();

    // Only these two statuses can be arrivals, departures or in-house.
    let reservations = Reservations::find()
        .filter(ResCol::PropertyId.eq(query.property_id))
        .filter(ResCol::Status.is_in([
            ReservationStatus::Confirmed.as_str(),
            ReservationStatus::CheckedIn.as_str(),
        ]))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(reservation_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let folio_statuses = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT f.status
        FROM folios f
        JOIN reservations r ON r.id = f.reservation_id
        WHERE r.property_id = $1
        "#,
    )
    .bind(query.property_id)
    .fetch_all(&state.pool)
    .await?
    .into_iter()
    .map(|(status,)| status.parse::<FolioStatus>())
    .collect::<DomainResult<Vec<_>>>()?;

    let tasks = HousekeepingTasks::find()
        .filter(TaskCol::PropertyId.eq(query.property_id))
        .filter(TaskCol::DueAt.is_not_null())
        .filter(TaskCol::Status.is_not_in([
            HousekeepingStatus::Done.as_str(),
            HousekeepingStatus::Inspected.as_str(),
        ]))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(task_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let tickets = MaintenanceTickets::find()
        .filter(TicketCol::PropertyId.eq(query.property_id))
        .filter(TicketCol::DueAt.is_not_null())
        .filter(TicketCol::Status.is_not_in([
            MaintenanceStatus::Resolved.as_str(),
            MaintenanceStatus::Closed.as_str(),
        ]))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ticket_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let data = dashboard_summary(&reservations, &folio_statuses, &tasks, &tickets, today, now);
    Ok(ApiResponse::item("Dashboard", data))
}

/// Resolves the requested window; without `from` it ends on `today`.
pub fn resolve_window(
    from: Option<NaiveDate>,
    days: Option<u32>,
    today: NaiveDate,
) -> DomainResult<Vec<NaiveDate>> {
    let days = days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(DomainError::validation(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}"
        )));
    }
    let window = match from {
        Some(from) => date_window(from, days),
        None => trailing_window(today, days),
    };
    if window.len() != days as usize {
        return Err(DomainError::validation("date window is out of range"));
    }
    Ok(window)
}

fn bounds(window: &[NaiveDate]) -> DomainResult<(NaiveDate, NaiveDate)> {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) => Ok((*first, *last)),
        _ => Err(DomainError::validation("date window is empty")),
    }
}

pub async fn revenue(state: &AppState, query: SeriesQuery) -> AppResult<ApiResponse<RevenueSeries>> {
    let window = resolve_window(query.from, query.days, state.today())?;
    let (from, to) = bounds(&window)?;

    let items = FolioItems::find()
        .join(JoinType::InnerJoin, folio_items::Relation::Folios.def())
        .join(JoinType::InnerJoin, folios::Relation::Reservations.def())
        .filter(ResCol::PropertyId.eq(query.property_id))
        .filter(FolioCol::Status.ne(FolioStatus::Void.as_str()))
        .filter(ItemCol::ServiceDate.between(from, to))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(folio_item_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let series = revenue_by_date(&items, &window);
    let total = sum_amounts(series.iter().map(|d| d.amount));
    let meta = Meta::total(series.len());

    Ok(ApiResponse::success(
        "Revenue",
        RevenueSeries {
            property_id: query.property_id,
            from,
            to,
            total,
            items: series,
        },
        Some(meta),
    ))
}

pub async fn occupancy(
    state: &AppState,
    query: SeriesQuery,
) -> AppResult<ApiResponse<OccupancySeries>> {
    let window = resolve_window(query.from, query.days, state.today())?;
    let (from, to) = bounds(&window)?;

    let reservations = Reservations::find()
        .filter(ResCol::PropertyId.eq(query.property_id))
        .filter(ResCol::CheckInDate.lte(to))
        .filter(ResCol::CheckOutDate.gt(from))
        .filter(ResCol::Status.is_in(
            ReservationStatus::ALL
                .into_iter()
                .filter(|s| s.occupies_room())
                .map(|s| s.as_str()),
        ))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(reservation_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let rooms = room_count(state, query.property_id).await?;
    let series = occupancy_by_date(&reservations, &window);
    let meta = Meta::total(series.len());

    Ok(ApiResponse::success(
        "Occupancy",
        OccupancySeries {
            property_id: query.property_id,
            from,
            to,
            rooms,
            items: series,
        },
        Some(meta),
    ))
}

async fn room_count(state: &AppState, property_id: Uuid) -> AppResult<u64> {
    let count = Rooms::find()
        .filter(RoomCol::PropertyId.eq(property_id))
        .count(&state.orm)
        .await?;
    Ok(count)
}
