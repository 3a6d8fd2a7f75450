use axum::body::Bytes;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        DomainError, DomainResult,
        task::{MaintenanceTicket, change_status, is_overdue},
    },
    dto::{
        housekeeping::StatusEventList,
        maintenance::{TicketList, TicketView, UpdateTicketRequest},
    },
    entity::maintenance_tickets::{
        ActiveModel as TicketActive, Column as TicketCol, Entity as MaintenanceTickets,
    },
    error::{AppError, AppResult},
    events::{EventSubject, append_status_event, list_status_events},
    middleware::actor::Actor,
    models::ticket_from_entity,
    response::{ApiResponse, Meta},
    routes::params::TicketListQuery,
    state::AppState,
    storage::put_then_record,
};

fn ticket_view(ticket: MaintenanceTicket) -> TicketView {
    let overdue = is_overdue(&ticket, Utc::now());
    TicketView { ticket, overdue }
}

pub async fn list_tickets(
    state: &AppState,
    query: TicketListQuery,
) -> AppResult<ApiResponse<TicketList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(property_id) = query.property_id {
        condition = condition.add(TicketCol::PropertyId.eq(property_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(TicketCol::Status.eq(status.as_str()));
    }
    if let Some(priority) = query.priority {
        condition = condition.add(TicketCol::Priority.eq(priority.as_str()));
    }

    let finder = MaintenanceTickets::find()
        .filter(condition)
        .order_by_desc(TicketCol::CreatedAt)
        .order_by_asc(TicketCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| ticket_from_entity(model).map(ticket_view))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ok",
        TicketList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn update_ticket(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateTicketRequest,
) -> AppResult<ApiResponse<TicketView>> {
    if let Some(description) = &payload.description {
        if description.trim().is_empty() {
            return Err(DomainError::validation("description must not be empty").into());
        }
    }

    let txn = state.orm.begin().await?;

    let model = MaintenanceTickets::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut ticket = ticket_from_entity(model.clone())?;

    let now = Utc::now();
    let event = payload
        .status
        .and_then(|to| change_status(&mut ticket, to, actor.user_id, now));
    if let Some(priority) = payload.priority {
        ticket.priority = priority;
    }
    if let Some(employee_id) = payload.assigned_to_employee_id {
        ticket.assign(employee_id);
    }
    if let Some(due_at) = payload.due_at {
        ticket.due_at = Some(due_at);
    }
    if let Some(description) = payload.description {
        ticket.description = description.trim().to_string();
    }

    let mut active: TicketActive = model.into();
    active.status = Set(ticket.status.as_str().to_string());
    active.priority = Set(ticket.priority.as_str().to_string());
    active.assigned_to_employee_id = Set(ticket.assigned_to_employee_id);
    active.due_at = Set(ticket.due_at.map(Into::into));
    active.description = Set(ticket.description.clone());
    active.updated_at = Set(now.into());
    active.update(&txn).await?;

    if let Some(event) = &event {
        append_status_event(&txn, EventSubject::MaintenanceTicket, id, event).await?;
    }

    txn.commit().await?;

    if let Some(event) = &event {
        tracing::info!(ticket_id = %id, status = %event.status, user_id = %actor.user_id, "maintenance status changed");
    }

    Ok(ApiResponse::item("Ticket updated", ticket_view(ticket)))
}

pub async fn ticket_events(state: &AppState, id: Uuid) -> AppResult<ApiResponse<StatusEventList>> {
    let exists = MaintenanceTickets::find_by_id(id).count(&state.orm).await? > 0;
    if !exists {
        return Err(AppError::NotFound);
    }

    let items = list_status_events(&state.pool, EventSubject::MaintenanceTicket, id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", StatusEventList { items }, Some(meta)))
}

/// Keeps `[A-Za-z0-9._-]`, so the object path stays a single safe segment.
fn object_name(filename: Option<&str>) -> String {
    let cleaned: String = filename
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let name = if cleaned.is_empty() { "photo" } else { cleaned };
    format!("{}-{}", Uuid::new_v4(), name)
}

async fn record_photo(
    state: &AppState,
    id: Uuid,
    url: String,
) -> AppResult<(MaintenanceTicket, String)> {
    let txn = state.orm.begin().await?;
    let model = MaintenanceTickets::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut ticket = ticket_from_entity(model.clone())?;
    ticket.photo_urls.push(url.clone());

    let mut active: TicketActive = model.into();
    active.photo_urls = Set(serde_json::Value::from(ticket.photo_urls.clone()));
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;
    txn.commit().await?;
    Ok((ticket, url))
}

/// Uploads first, then records the URL; the row lock is not held during I/O.
/// A failed update removes the upload again.
pub async fn attach_photo(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    filename: Option<&str>,
    bytes: Bytes,
) -> AppResult<ApiResponse<TicketView>> {
    let exists = MaintenanceTickets::find_by_id(id).count(&state.orm).await? > 0;
    if !exists {
        return Err(AppError::NotFound);
    }

    let path = format!("maintenance/{id}/{}", object_name(filename));
    let (ticket, url) = put_then_record(state.blobs.as_ref(), &path, bytes, |url| {
        record_photo(state, id, url)
    })
    .await?;

    tracing::info!(ticket_id = %id, url = %url, user_id = %actor.user_id, "photo attached");
    Ok(ApiResponse::item("Photo attached", ticket_view(ticket)))
}
