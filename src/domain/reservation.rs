//! Reservation lifecycle.
//!
//! ```text
//! HOLD        -> CONFIRMED, CANCELLED
//! CONFIRMED   -> CHECKED_IN, CANCELLED, NO_SHOW
//! CHECKED_IN  -> CHECKED_OUT
//! CHECKED_OUT, CANCELLED, NO_SHOW are terminal
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Hold,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        Self::Hold,
        Self::Confirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
        Self::NoShow,
    ];

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled | Self::NoShow)
    }

    /// Statuses reachable in one step.
    pub const fn next(&self) -> &'static [ReservationStatus] {
        match self {
            Self::Hold => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::CheckedIn, Self::Cancelled, Self::NoShow],
            Self::CheckedIn => &[Self::CheckedOut],
            Self::CheckedOut | Self::Cancelled | Self::NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, to: ReservationStatus) -> bool {
        self.next().contains(&to)
    }

    /// Whether a stay in this status occupies a room on its nights.
    pub const fn occupies_room(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn | Self::CheckedOut)
    }
}

string_codes!(ReservationStatus, "reservation status", {
    Hold => "HOLD",
    Confirmed => "CONFIRMED",
    CheckedIn => "CHECKED_IN",
    CheckedOut => "CHECKED_OUT",
    Cancelled => "CANCELLED",
    NoShow => "NO_SHOW",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub code: String,
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub status: ReservationStatus,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub primary_guest_id: Uuid,
}

impl Reservation {
    pub fn validate(&self) -> DomainResult<()> {
        if self.check_out_date <= self.check_in_date {
            return Err(DomainError::validation(format!(
                "check-out date {} must be after check-in date {}",
                self.check_out_date, self.check_in_date
            )));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("reservation code must not be empty"));
        }
        Ok(())
    }

    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    /// No date gating: early and late check-in are at the operator's discretion.
    pub fn can_check_in(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    pub fn can_check_out(&self) -> bool {
        self.status == ReservationStatus::CheckedIn
    }

    /// Moves to `to` if the lifecycle allows it. On error the status is untouched.
    pub fn transition(&mut self, to: ReservationStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                entity: "reservation",
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn confirm(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::Confirmed)
    }

    pub fn check_in(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::CheckedIn)
    }

    pub fn check_out(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::CheckedOut)
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::Cancelled)
    }

    pub fn mark_no_show(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::NoShow)
    }

    /// Due to arrive today or overdue (late arrival); no lower date bound.
    pub fn is_arrival(&self, today: NaiveDate) -> bool {
        self.status == ReservationStatus::Confirmed && self.check_in_date <= today
    }

    /// Due to leave today or overstaying.
    pub fn is_departure(&self, today: NaiveDate) -> bool {
        self.status == ReservationStatus::CheckedIn && self.check_out_date <= today
    }

    pub fn is_in_house(&self) -> bool {
        self.status == ReservationStatus::CheckedIn
    }

    /// Whether the night starting on `date` is part of this stay.
    pub fn stays_on(&self, date: NaiveDate) -> bool {
        self.status.occupies_room() && self.check_in_date <= date && date < self.check_out_date
    }
}
