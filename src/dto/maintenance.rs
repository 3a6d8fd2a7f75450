use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::task::{MaintenanceStatus, MaintenanceTicket, Priority};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub status: Option<MaintenanceStatus>,
    pub priority: Option<Priority>,
    pub assigned_to_employee_id: Option<Uuid>,
    pub due_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: MaintenanceTicket,
    pub overdue: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketList {
    pub items: Vec<TicketView>,
}
