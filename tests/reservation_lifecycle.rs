use chrono::NaiveDate;
use hotel_ops_api::domain::{
    DomainError,
    reservation::{Reservation, ReservationStatus},
};
use uuid::Uuid;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn reservation(status: ReservationStatus, check_in: &str, check_out: &str) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        code: "HV-0001".into(),
        property_id: Uuid::new_v4(),
        room_id: None,
        status,
        check_in_date: date(check_in),
        check_out_date: date(check_out),
        adults: 2,
        children: 0,
        primary_guest_id: Uuid::new_v4(),
    }
}

#[test]
fn can_check_in_only_when_confirmed() {
    for status in ReservationStatus::ALL {
        let r = reservation(status, "2024-03-01", "2024-03-04");
        assert_eq!(r.can_check_in(), status == ReservationStatus::Confirmed, "{status}");
    }
}

#[test]
fn rejected_check_in_leaves_status_unchanged() {
    for status in ReservationStatus::ALL {
        if status == ReservationStatus::Confirmed {
            continue;
        }
        let mut r = reservation(status, "2024-03-01", "2024-03-04");
        let err = r.check_in().expect_err("check-in must fail");
        assert!(matches!(err, DomainError::InvalidTransition { .. }), "{status}: {err}");
        assert_eq!(r.status, status);
    }
}

#[test]
fn check_in_then_check_out() {
    let mut r = reservation(ReservationStatus::Confirmed, "2024-03-01", "2024-03-04");
    r.check_in().expect("check-in");
    assert_eq!(r.status, ReservationStatus::CheckedIn);
    assert!(r.can_check_out());

    r.check_out().expect("check-out");
    assert_eq!(r.status, ReservationStatus::CheckedOut);
}

#[test]
fn check_out_requires_checked_in() {
    let mut r = reservation(ReservationStatus::Confirmed, "2024-03-01", "2024-03-04");
    assert!(!r.can_check_out());
    assert!(r.check_out().is_err());
    assert_eq!(r.status, ReservationStatus::Confirmed);
}

#[test]
fn terminal_states_reject_every_transition() {
    let terminal = [
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ];
    for from in terminal {
        assert!(from.is_terminal());
        for to in ReservationStatus::ALL {
            let mut r = reservation(from, "2024-03-01", "2024-03-04");
            assert!(r.transition(to).is_err(), "{from} -> {to} must be rejected");
            assert_eq!(r.status, from);
        }
    }
}

#[test]
fn hold_can_be_confirmed_or_cancelled_only() {
    let mut r = reservation(ReservationStatus::Hold, "2024-03-01", "2024-03-04");
    assert!(r.check_in().is_err());
    assert!(r.mark_no_show().is_err());
    r.confirm().expect("confirm");
    assert_eq!(r.status, ReservationStatus::Confirmed);

    let mut held = reservation(ReservationStatus::Hold, "2024-03-01", "2024-03-04");
    held.cancel().expect("cancel");
    assert_eq!(held.status, ReservationStatus::Cancelled);
}

#[test]
fn no_show_only_from_confirmed() {
    let mut r = reservation(ReservationStatus::Confirmed, "2024-03-01", "2024-03-04");
    r.mark_no_show().expect("no-show");
    assert_eq!(r.status, ReservationStatus::NoShow);

    let mut in_house = reservation(ReservationStatus::CheckedIn, "2024-03-01", "2024-03-04");
    assert!(in_house.mark_no_show().is_err());
    assert!(in_house.cancel().is_err());
}

#[test]
fn late_arrival_then_in_house() {
    let today = date("2024-03-03");
    let mut r = reservation(ReservationStatus::Confirmed, "2024-03-01", "2024-03-05");
    assert!(r.is_arrival(today));
    assert!(!r.is_in_house());

    r.check_in().expect("check-in");
    assert!(!r.is_arrival(today));
    assert!(r.is_in_house());
}

#[test]
fn future_arrival_is_not_an_arrival_yet() {
    let r = reservation(ReservationStatus::Confirmed, "2024-03-10", "2024-03-12");
    assert!(!r.is_arrival(date("2024-03-09")));
    assert!(r.is_arrival(date("2024-03-10")));
}

#[test]
fn departure_today_is_also_in_house() {
    let today = date("2024-03-04");
    let r = reservation(ReservationStatus::CheckedIn, "2024-03-01", "2024-03-04");
    assert!(r.is_departure(today));
    assert!(r.is_in_house());

    let overstay = reservation(ReservationStatus::CheckedIn, "2024-03-01", "2024-03-02");
    assert!(overstay.is_departure(today));

    let staying = reservation(ReservationStatus::CheckedIn, "2024-03-01", "2024-03-06");
    assert!(!staying.is_departure(today));
}

#[test]
fn validate_requires_check_out_after_check_in() {
    let same_day = reservation(ReservationStatus::Hold, "2024-03-01", "2024-03-01");
    assert!(matches!(same_day.validate(), Err(DomainError::Validation(_))));

    let backwards = reservation(ReservationStatus::Hold, "2024-03-05", "2024-03-01");
    assert!(backwards.validate().is_err());

    let ok = reservation(ReservationStatus::Hold, "2024-03-01", "2024-03-04");
    assert!(ok.validate().is_ok());
    assert_eq!(ok.nights(), 3);
}

#[test]
fn stays_on_covers_nights_not_departure_day() {
    let r = reservation(ReservationStatus::Confirmed, "2024-03-01", "2024-03-03");
    assert!(r.stays_on(date("2024-03-01")));
    assert!(r.stays_on(date("2024-03-02")));
    assert!(!r.stays_on(date("2024-03-03")));

    let cancelled = reservation(ReservationStatus::Cancelled, "2024-03-01", "2024-03-03");
    assert!(!cancelled.stays_on(date("2024-03-01")));
}

#[test]
fn status_codes_parse_and_render() {
    assert_eq!("CHECKED_IN".parse::<ReservationStatus>(), Ok(ReservationStatus::CheckedIn));
    assert_eq!(ReservationStatus::NoShow.to_string(), "NO_SHOW");
    assert!(matches!(
        "checked_in".parse::<ReservationStatus>(),
        Err(DomainError::Validation(_))
    ));
    for status in ReservationStatus::ALL {
        assert_eq!(status.as_str().parse::<ReservationStatus>(), Ok(status));
        assert_eq!(status.to_string(), status.as_str());
    }

    let json = serde_json::to_string(&ReservationStatus::CheckedOut).expect("serialize");
    assert_eq!(json, "\"CHECKED_OUT\"");
}
