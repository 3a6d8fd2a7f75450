//! Housekeeping tasks and maintenance tickets.
//!
//! Status selection is loose: any status in the enum may follow
//! any other. What is enforced is the append-only history and the overdue
//! derivation, which is recomputed against the caller's `now` on every read.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    dates::is_past_due,
    error::{DomainError, DomainResult},
};

/// A status enum with a set of terminal (finished) values.
pub trait TaskStatus: Copy + Eq + std::fmt::Display {
    fn is_terminal(&self) -> bool;
}

/// Anything carrying a task status and an optional due time.
pub trait Tracked {
    type Status: TaskStatus;

    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);
    fn due_at(&self) -> Option<DateTime<Utc>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HousekeepingStatus {
    Pending,
    InProgress,
    Done,
    Inspected,
}

string_codes!(HousekeepingStatus, "housekeeping status", {
    Pending => "PENDING",
    InProgress => "IN_PROGRESS",
    Done => "DONE",
    Inspected => "INSPECTED",
});

impl TaskStatus for HousekeepingStatus {
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Inspected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

string_codes!(MaintenanceStatus, "maintenance status", {
    Open => "OPEN",
    InProgress => "IN_PROGRESS",
    Resolved => "RESOLVED",
    Closed => "CLOSED",
});

impl TaskStatus for MaintenanceStatus {
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Am,
    Pm,
    Night,
}

string_codes!(Shift, "shift", {
    Am => "AM",
    Pm => "PM",
    Night => "NIGHT",
});

/// Ordered from least to most pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

string_codes!(Priority, "priority", {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Urgent => "URGENT",
});

/// One entry of a status history. Never edited once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent<S> {
    pub status: S,
    pub changed_at: DateTime<Utc>,
    pub changed_by_user_id: Uuid,
}

/// Append-only status history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistory<S> {
    events: Vec<StatusEvent<S>>,
}

impl<S> Default for StatusHistory<S> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<S> StatusHistory<S> {
    /// Builds a history from stored events in any order.
    pub fn from_events(mut events: Vec<StatusEvent<S>>) -> Self {
        events.sort_by_key(|e| e.changed_at);
        Self { events }
    }

    pub fn append(&mut self, event: StatusEvent<S>) {
        self.events.push(event);
    }

    pub fn latest(&self) -> Option<&StatusEvent<S>> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEvent<S>> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<StatusEvent<S>> {
        self.events
    }
}

/// `due_at` set, status not terminal, and `due_at` strictly before `now`.
pub fn compute_overdue<S: TaskStatus>(
    due_at: Option<DateTime<Utc>>,
    status: S,
    now: DateTime<Utc>,
) -> bool {
    match due_at {
        Some(due) => !status.is_terminal() && is_past_due(due, now),
        None => false,
    }
}

pub fn is_overdue<T: Tracked>(task: &T, now: DateTime<Utc>) -> bool {
    compute_overdue(task.due_at(), task.status(), now)
}

/// Sets the status and returns the event to append, or `None` when the task
/// already has that status.
pub fn change_status<T: Tracked>(
    task: &mut T,
    to: T::Status,
    changed_by_user_id: Uuid,
    changed_at: DateTime<Utc>,
) -> Option<StatusEvent<T::Status>> {
    if task.status() == to {
        return None;
    }
    task.set_status(to);
    Some(StatusEvent {
        status: to,
        changed_at,
        changed_by_user_id,
    })
}

/// Cleaning checklist stored as a JSON object of item -> done.
///
/// Only syntactic shape is checked: an object whose values are booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Checklist(pub BTreeMap<String, bool>);

impl Checklist {
    /// Blank input is an empty checklist.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str::<BTreeMap<String, bool>>(raw)
            .map(Checklist)
            .map_err(|err| DomainError::validation(format!("checklist must be a JSON object of booleans: {err}")))
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn set(&mut self, item: impl Into<String>, done: bool) {
        self.0.insert(item.into(), done);
    }

    pub fn completed(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn is_complete(&self) -> bool {
        self.0.values().all(|done| *done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HousekeepingTask {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_id: Uuid,
    pub task_date: NaiveDate,
    pub shift: Shift,
    pub status: HousekeepingStatus,
    pub assigned_to_employee_id: Option<Uuid>,
    pub checklist: Checklist,
    pub due_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl HousekeepingTask {
    pub fn assign(&mut self, employee_id: Uuid) {
        self.assigned_to_employee_id = Some(employee_id);
    }
}

impl Tracked for HousekeepingTask {
    type Status = HousekeepingStatus;

    fn status(&self) -> HousekeepingStatus {
        self.status
    }

    fn set_status(&mut self, status: HousekeepingStatus) {
        self.status = status;
    }

    fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    pub description: String,
    pub reported_by_user_id: Uuid,
    pub assigned_to_employee_id: Option<Uuid>,
    pub due_at: Option<DateTime<Utc>>,
    pub photo_urls: Vec<String>,
}

impl MaintenanceTicket {
    pub fn assign(&mut self, employee_id: Uuid) {
        self.assigned_to_employee_id = Some(employee_id);
    }
}

impl Tracked for MaintenanceTicket {
    type Status = MaintenanceStatus;

    fn status(&self) -> MaintenanceStatus {
        self.status
    }

    fn set_status(&mut self, status: MaintenanceStatus) {
        self.status = status;
    }

    fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
}
