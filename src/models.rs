//! Conversions between stored rows and domain snapshots.
//!
//! Rows keep statuses as text; an unknown value surfaces as a validation
//! error rather than being coerced.

use chrono::Utc;

use crate::{
    domain::{
        DomainError, DomainResult,
        folio::{Folio, FolioItem, Payment},
        reservation::Reservation,
        task::{Checklist, HousekeepingTask, MaintenanceTicket},
        views::RoomLabel,
    },
    entity::{
        folio_items::Model as FolioItemModel, folios::Model as FolioModel,
        housekeeping_tasks::Model as TaskModel, maintenance_tickets::Model as TicketModel,
        payments::Model as PaymentModel, reservations::Model as ReservationModel,
        rooms::Model as RoomModel,
    },
};

fn non_negative(field: &str, value: i32) -> DomainResult<u32> {
    u32::try_from(value).map_err(|_| DomainError::validation(format!("{field} must not be negative")))
}

pub fn reservation_from_entity(model: ReservationModel) -> DomainResult<Reservation> {
    Ok(Reservation {
        id: model.id,
        code: model.code,
        property_id: model.property_id,
        room_id: model.room_id,
        status: model.status.parse()?,
        check_in_date: model.check_in_date,
        check_out_date: model.check_out_date,
        adults: non_negative("adults", model.adults)?,
        children: non_negative("children", model.children)?,
        primary_guest_id: model.primary_guest_id,
    })
}

pub fn folio_item_from_entity(model: FolioItemModel) -> DomainResult<FolioItem> {
    Ok(FolioItem {
        id: model.id,
        item_type: model.item_type.parse()?,
        description: model.description,
        quantity: model.quantity,
        unit_price: model.unit_price,
        service_date: model.service_date,
    })
}

pub fn payment_from_entity(model: PaymentModel) -> DomainResult<Payment> {
    Ok(Payment {
        id: model.id,
        method: model.method.parse()?,
        amount: model.amount,
        currency: model.currency,
        status: model.status.parse()?,
        provider: model.provider,
        provider_ref: model.provider_ref,
        idempotency_key: model.idempotency_key,
        received_at: model.received_at.with_timezone(&Utc),
    })
}

pub fn folio_from_entities(
    model: FolioModel,
    items: Vec<FolioItemModel>,
    payments: Vec<PaymentModel>,
) -> DomainResult<Folio> {
    Ok(Folio {
        id: model.id,
        reservation_id: model.reservation_id,
        status: model.status.parse()?,
        currency: model.currency,
        items: items
            .into_iter()
            .map(folio_item_from_entity)
            .collect::<DomainResult<Vec<_>>>()?,
        payments: payments
            .into_iter()
            .map(payment_from_entity)
            .collect::<DomainResult<Vec<_>>>()?,
    })
}

pub fn task_from_entity(model: TaskModel) -> DomainResult<HousekeepingTask> {
    Ok(HousekeepingTask {
        id: model.id,
        property_id: model.property_id,
        room_id: model.room_id,
        task_date: model.task_date,
        shift: model.shift.parse()?,
        status: model.status.parse()?,
        assigned_to_employee_id: model.assigned_to_employee_id,
        checklist: Checklist::parse(&model.checklist)?,
        due_at: model.due_at.map(|dt| dt.with_timezone(&Utc)),
        notes: model.notes,
    })
}

pub fn ticket_from_entity(model: TicketModel) -> DomainResult<MaintenanceTicket> {
    let photo_urls: Vec<String> = serde_json::from_value(model.photo_urls)
        .map_err(|_| DomainError::validation("photo_urls must be an array of strings"))?;
    Ok(MaintenanceTicket {
        id: model.id,
        property_id: model.property_id,
        room_id: model.room_id,
        priority: model.priority.parse()?,
        status: model.status.parse()?,
        description: model.description,
        reported_by_user_id: model.reported_by_user_id,
        assigned_to_employee_id: model.assigned_to_employee_id,
        due_at: model.due_at.map(|dt| dt.with_timezone(&Utc)),
        photo_urls,
    })
}

pub fn room_label_from_entity(model: RoomModel) -> RoomLabel {
    RoomLabel {
        id: model.id,
        number: model.number,
    }
}
