use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        folio::{Folio, FolioItem, FolioItemType, FolioStatus, Payment, PaymentMethod, PaymentStatus},
        reservation::{Reservation, ReservationStatus},
        task::{
            Checklist, HousekeepingStatus, HousekeepingTask, MaintenanceStatus, MaintenanceTicket,
            Priority, Shift,
        },
        views::{BoardEntry, DailyAmount, DailyCount, DashboardSummary, ReservationCounts, RoomLabel},
    },
    dto::{
        dashboard::{OccupancySeries, RevenueSeries},
        folios::{AddFolioItemRequest, AddPaymentRequest, FolioView, PaymentReceipt},
        housekeeping::{HousekeepingBoard, StatusEventList, TaskList, TaskView, UpdateTaskRequest},
        maintenance::{TicketList, TicketView, UpdateTicketRequest},
        reservations::{ReservationList, ReservationView},
    },
    events::StatusEventRecord,
    response::{ApiResponse, Meta},
    routes::{dashboard, folios, health, housekeeping, maintenance, params, reservations},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::confirm_reservation,
        reservations::check_in,
        reservations::check_out,
        reservations::cancel_reservation,
        reservations::mark_no_show,
        folios::get_folio,
        folios::add_item,
        folios::add_payment,
        folios::close_folio,
        folios::void_folio,
        housekeeping::list_tasks,
        housekeeping::board,
        housekeeping::update_task,
        housekeeping::task_events,
        maintenance::list_tickets,
        maintenance::update_ticket,
        maintenance::ticket_events,
        maintenance::attach_photo,
        dashboard::summary,
        dashboard::revenue,
        dashboard::occupancy
    ),
    components(
        schemas(
            Reservation,
            ReservationStatus,
            ReservationView,
            ReservationList,
            Folio,
            FolioStatus,
            FolioItem,
            FolioItemType,
            Payment,
            PaymentMethod,
            PaymentStatus,
            FolioView,
            PaymentReceipt,
            AddFolioItemRequest,
            AddPaymentRequest,
            HousekeepingTask,
            HousekeepingStatus,
            Shift,
            Checklist,
            TaskView,
            TaskList,
            UpdateTaskRequest,
            HousekeepingBoard,
            BoardEntry,
            RoomLabel,
            MaintenanceTicket,
            MaintenanceStatus,
            Priority,
            TicketView,
            TicketList,
            UpdateTicketRequest,
            StatusEventRecord,
            StatusEventList,
            DashboardSummary,
            ReservationCounts,
            DailyAmount,
            DailyCount,
            RevenueSeries,
            OccupancySeries,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<ReservationView>,
            ApiResponse<ReservationList>,
            ApiResponse<FolioView>,
            ApiResponse<PaymentReceipt>,
            ApiResponse<TaskList>,
            ApiResponse<TaskView>,
            ApiResponse<TicketList>,
            ApiResponse<TicketView>,
            ApiResponse<DashboardSummary>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Reservations", description = "Reservation lifecycle: confirm, check-in, check-out, cancel, no-show"),
        (name = "Folios", description = "Guest bills: items, payments, close and void"),
        (name = "Housekeeping", description = "Housekeeping tasks and the daily board"),
        (name = "Maintenance", description = "Maintenance tickets and photos"),
        (name = "Dashboard", description = "Front-desk counts and daily series"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
