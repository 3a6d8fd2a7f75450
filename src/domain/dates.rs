//! Calendar-date helpers.
//!
//! Reservation predicates compare whole dates, never timestamps, so the only
//! place a time zone matters is turning "now" into the property's "today".

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};

use super::error::{DomainError, DomainResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default width of dashboard series.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Calendar date at `offset` for the instant `now`.
pub fn local_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

pub fn utc_offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_tomorrow(date: NaiveDate, today: NaiveDate) -> bool {
    date == tomorrow(today)
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Strictly-before comparison used for overdue derivation.
pub fn is_past_due(due_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due_at < now
}

/// `days` consecutive dates starting at `start`, in ascending order.
pub fn date_window(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(u64::from(offset))))
        .collect()
}

/// Window of `days` dates that ends on `last` (inclusive).
pub fn trailing_window(last: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let back = u64::from(days.saturating_sub(1));
    let start = last.checked_sub_days(Days::new(back)).unwrap_or(last);
    date_window(start, days)
}

pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::validation(format!("invalid date {value:?}, expected YYYY-MM-DD")))
}
