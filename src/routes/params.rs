use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    reservation::ReservationStatus,
    task::{HousekeepingStatus, MaintenanceStatus, Priority, Shift},
};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

// Paging fields are repeated instead of flattened: serde_urlencoded cannot
// parse numbers through `#[serde(flatten)]`.

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ReservationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub property_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
    /// Only stays that include this date (check-in <= date <= check-out).
    pub date: Option<NaiveDate>,
    pub sort_order: Option<SortOrder>,
}

impl ReservationListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct TaskListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub property_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<HousekeepingStatus>,
}

impl TaskListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BoardQuery {
    pub property_id: Uuid,
    /// Defaults to the property's current date.
    pub date: Option<NaiveDate>,
    pub shift: Option<Shift>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct TicketListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub property_id: Option<Uuid>,
    pub status: Option<MaintenanceStatus>,
    pub priority: Option<Priority>,
}

impl TicketListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PhotoQuery {
    /// Original file name; only used to build the stored object name.
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQuery {
    pub property_id: Uuid,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct SeriesQuery {
    pub property_id: Uuid,
    /// First day of the window; defaults so the window ends today.
    pub from: Option<NaiveDate>,
    /// Window length, 7 by default.
    pub days: Option<u32>,
}
