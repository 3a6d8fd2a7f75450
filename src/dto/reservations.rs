use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::reservation::{Reservation, ReservationStatus};

/// A reservation plus the actions the front desk may offer for it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub nights: i64,
    pub can_check_in: bool,
    pub can_check_out: bool,
    pub next_statuses: Vec<ReservationStatus>,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        Self {
            nights: reservation.nights(),
            can_check_in: reservation.can_check_in(),
            can_check_out: reservation.can_check_out(),
            next_statuses: reservation.status.next().to_vec(),
            reservation,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationList {
    pub items: Vec<ReservationView>,
}
