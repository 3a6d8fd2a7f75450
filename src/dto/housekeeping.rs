use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        task::{Checklist, HousekeepingStatus, HousekeepingTask},
        views::BoardEntry,
    },
    events::StatusEventRecord,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub status: Option<HousekeepingStatus>,
    pub assigned_to_employee_id: Option<Uuid>,
    pub checklist: Option<Checklist>,
    pub due_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: HousekeepingTask,
    pub overdue: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskList {
    pub items: Vec<TaskView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HousekeepingBoard {
    pub property_id: Uuid,
    pub date: NaiveDate,
    pub items: Vec<BoardEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusEventList {
    pub items: Vec<StatusEventRecord>,
}
