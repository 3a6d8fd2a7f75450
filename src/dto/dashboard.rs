use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::views::{DailyAmount, DailyCount};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSeries {
    pub property_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: i64,
    pub items: Vec<DailyAmount>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySeries {
    pub property_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rooms: u64,
    pub items: Vec<DailyCount>,
}
