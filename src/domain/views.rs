//! Read-side projections built from the status predicates: front-desk
//! counts, the housekeeping board and dense per-day series for charts.

use std::{cmp::Ordering, collections::HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    folio::{FolioItem, FolioStatus},
    reservation::Reservation,
    task::{HousekeepingTask, MaintenanceTicket, Shift, is_overdue},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCounts {
    pub arrivals: usize,
    pub departures: usize,
    pub in_house: usize,
}

/// Single pass over `reservations`. A guest leaving today is counted both
/// as in-house and as a departure.
pub fn reservation_counts(reservations: &[Reservation], today: NaiveDate) -> ReservationCounts {
    reservations
        .iter()
        .fold(ReservationCounts::default(), |mut counts, r| {
            if r.is_arrival(today) {
                counts.arrivals += 1;
            }
            if r.is_departure(today) {
                counts.departures += 1;
            }
            if r.is_in_house() {
                counts.in_house += 1;
            }
            counts
        })
}

pub fn count_arrivals(reservations: &[Reservation], today: NaiveDate) -> usize {
    reservations.iter().filter(|r| r.is_arrival(today)).count()
}

pub fn count_departures(reservations: &[Reservation], today: NaiveDate) -> usize {
    reservations.iter().filter(|r| r.is_departure(today)).count()
}

pub fn count_in_house(reservations: &[Reservation]) -> usize {
    reservations.iter().filter(|r| r.is_in_house()).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomLabel {
    pub id: Uuid,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    #[serde(flatten)]
    pub task: HousekeepingTask,
    pub room_number: Option<String>,
    pub overdue: bool,
}

/// Numeric room numbers sort numerically, anything else after them.
fn compare_room_numbers(a: Option<&str>, b: Option<&str>) -> Ordering {
    let key = |n: Option<&str>| {
        let numeric = n.and_then(|s| s.parse::<u64>().ok());
        (n.is_none(), numeric.is_none(), numeric, n.map(str::to_owned))
    };
    key(a).cmp(&key(b))
}

/// Tasks for one property and day (optionally one shift), joined with their
/// room label and overdue flag. Output order depends only on the entries,
/// not on input order.
pub fn housekeeping_board(
    tasks: &[HousekeepingTask],
    rooms: &[RoomLabel],
    property_id: Uuid,
    date: NaiveDate,
    shift: Option<Shift>,
    now: DateTime<Utc>,
) -> Vec<BoardEntry> {
    let labels: HashMap<Uuid, &str> = rooms.iter().map(|r| (r.id, r.number.as_str())).collect();

    let mut board: Vec<BoardEntry> = tasks
        .iter()
        .filter(|t| t.property_id == property_id && t.task_date == date)
        .filter(|t| shift.is_none_or(|s| t.shift == s))
        .map(|t| BoardEntry {
            task: t.clone(),
            room_number: labels.get(&t.room_id).map(|n| n.to_string()),
            overdue: is_overdue(t, now),
        })
        .collect();

    board.sort_by(|a, b| {
        compare_room_numbers(a.room_number.as_deref(), b.room_number.as_deref())
            .then(a.task.shift.cmp(&b.task.shift))
            .then(a.task.id.cmp(&b.task.id))
    });
    board
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Charges grouped by service date over `window`. Every date in the window
/// appears exactly once, zero when nothing was posted; items outside the
/// window are ignored.
pub fn revenue_by_date(items: &[FolioItem], window: &[NaiveDate]) -> Vec<DailyAmount> {
    let mut totals: HashMap<NaiveDate, i64> = window.iter().map(|d| (*d, 0)).collect();
    for item in items {
        if let Some(total) = totals.get_mut(&item.service_date) {
            *total = total.saturating_add(item.amount());
        }
    }
    window
        .iter()
        .map(|date| DailyAmount {
            date: *date,
            amount: totals.get(date).copied().unwrap_or(0),
        })
        .collect()
}

/// Occupied rooms per night over `window`, zero-filled.
pub fn occupancy_by_date(reservations: &[Reservation], window: &[NaiveDate]) -> Vec<DailyCount> {
    window
        .iter()
        .map(|date| DailyCount {
            date: *date,
            count: reservations.iter().filter(|r| r.stays_on(*date)).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub reservations: ReservationCounts,
    pub open_folios: usize,
    pub overdue_housekeeping: usize,
    pub overdue_maintenance: usize,
}

pub fn dashboard_summary(
    reservations: &[Reservation],
    folio_statuses: &[FolioStatus],
    tasks: &[HousekeepingTask],
    tickets: &[MaintenanceTicket],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> DashboardSummary {
    DashboardSummary {
        date: today,
        reservations: reservation_counts(reservations, today),
        open_folios: folio_statuses
            .iter()
            .filter(|s| **s == FolioStatus::Open)
            .count(),
        overdue_housekeeping: tasks.iter().filter(|t| is_overdue(*t, now)).count(),
        overdue_maintenance: tickets.iter().filter(|t| is_overdue(*t, now)).count(),
    }
}
