use chrono::{Duration, NaiveDate, TimeZone, Utc};
use hotel_ops_api::domain::{
    DomainError,
    task::{
        Checklist, HousekeepingStatus, HousekeepingTask, MaintenanceStatus, MaintenanceTicket,
        Priority, Shift, StatusEvent, StatusHistory, change_status, compute_overdue, is_overdue,
    },
};
use uuid::Uuid;

fn task(status: HousekeepingStatus, due_in: Option<Duration>) -> HousekeepingTask {
    let now = Utc::now();
    HousekeepingTask {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        room_id: Uuid::new_v4(),
        task_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        shift: Shift::Am,
        status,
        assigned_to_employee_id: None,
        checklist: Checklist::default(),
        due_at: due_in.map(|d| now + d),
        notes: None,
    }
}

#[test]
fn pending_task_past_due_is_overdue() {
    let now = Utc::now();
    let t = HousekeepingTask {
        due_at: Some(now - Duration::seconds(1)),
        ..task(HousekeepingStatus::Pending, None)
    };
    assert!(is_overdue(&t, now));
}

#[test]
fn finished_task_is_never_overdue() {
    let now = Utc::now();
    for status in [HousekeepingStatus::Done, HousekeepingStatus::Inspected] {
        let t = HousekeepingTask {
            due_at: Some(now - Duration::seconds(1)),
            ..task(status, None)
        };
        assert!(!is_overdue(&t, now), "{status}");
    }
}

#[test]
fn task_without_due_time_is_never_overdue() {
    let far_future = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).single().expect("valid time");
    for status in [HousekeepingStatus::Pending, HousekeepingStatus::InProgress] {
        assert!(!compute_overdue(None, status, far_future));
    }
}

#[test]
fn due_exactly_now_is_not_yet_overdue() {
    let now = Utc::now();
    assert!(!compute_overdue(Some(now), HousekeepingStatus::Pending, now));
}

#[test]
fn overdue_follows_the_clock() {
    let t = task(HousekeepingStatus::InProgress, Some(Duration::minutes(30)));
    let due = t.due_at.expect("due");
    assert!(!is_overdue(&t, due - Duration::minutes(1)));
    assert!(is_overdue(&t, due + Duration::minutes(1)));
}

#[test]
fn maintenance_terminal_set_is_resolved_and_closed() {
    let now = Utc::now();
    let past = Some(now - Duration::hours(1));
    assert!(compute_overdue(past, MaintenanceStatus::Open, now));
    assert!(compute_overdue(past, MaintenanceStatus::InProgress, now));
    assert!(!compute_overdue(past, MaintenanceStatus::Resolved, now));
    assert!(!compute_overdue(past, MaintenanceStatus::Closed, now));
}

#[test]
fn any_status_may_follow_any_other() {
    let actor = Uuid::new_v4();
    let mut t = task(HousekeepingStatus::Pending, None);

    let event = change_status(&mut t, HousekeepingStatus::Inspected, actor, Utc::now())
        .expect("status changed");
    assert_eq!(event.status, HousekeepingStatus::Inspected);
    assert_eq!(event.changed_by_user_id, actor);

    change_status(&mut t, HousekeepingStatus::Pending, actor, Utc::now()).expect("reopened");
    assert_eq!(t.status, HousekeepingStatus::Pending);
}

#[test]
fn same_status_records_nothing() {
    let mut t = task(HousekeepingStatus::InProgress, None);
    assert!(change_status(&mut t, HousekeepingStatus::InProgress, Uuid::new_v4(), Utc::now()).is_none());
}

#[test]
fn ticket_status_changes_produce_events() {
    let mut ticket = MaintenanceTicket {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        room_id: None,
        priority: Priority::Urgent,
        status: MaintenanceStatus::Open,
        description: "Leaking tap".into(),
        reported_by_user_id: Uuid::new_v4(),
        assigned_to_employee_id: None,
        due_at: None,
        photo_urls: Vec::new(),
    };
    let mut history = StatusHistory::default();
    let actor = Uuid::new_v4();
    let start = Utc::now();

    for (i, status) in [MaintenanceStatus::InProgress, MaintenanceStatus::Resolved]
        .into_iter()
        .enumerate()
    {
        let at = start + Duration::minutes(i as i64);
        if let Some(event) = change_status(&mut ticket, status, actor, at) {
            history.append(event);
        }
    }

    assert_eq!(history.len(), 2);
    assert_eq!(
        history.latest().map(|e| e.status),
        Some(MaintenanceStatus::Resolved)
    );
    assert_eq!(ticket.status, MaintenanceStatus::Resolved);
}

#[test]
fn history_from_stored_events_is_chronological() {
    let actor = Uuid::new_v4();
    let t0 = Utc::now();
    let events = vec![
        StatusEvent { status: HousekeepingStatus::Done, changed_at: t0 + Duration::minutes(20), changed_by_user_id: actor },
        StatusEvent { status: HousekeepingStatus::InProgress, changed_at: t0, changed_by_user_id: actor },
    ];
    let history = StatusHistory::from_events(events);
    let order: Vec<_> = history.iter().map(|e| e.status).collect();
    assert_eq!(order, vec![HousekeepingStatus::InProgress, HousekeepingStatus::Done]);
}

#[test]
fn checklist_round_trips_through_text() {
    let mut checklist = Checklist::parse(r#"{"beds": true, "bathroom": false}"#).expect("parse");
    assert_eq!(checklist.total(), 2);
    assert_eq!(checklist.completed(), 1);
    assert!(!checklist.is_complete());

    checklist.set("bathroom", true);
    let text = checklist.to_json_string();
    let reparsed = Checklist::parse(&text).expect("reparse");
    assert_eq!(reparsed, checklist);
    assert!(reparsed.is_complete());
}

#[test]
fn checklist_rejects_malformed_documents() {
    assert!(Checklist::parse("").expect("blank").0.is_empty());
    for raw in ["not json", "[true]", r#"{"beds": "yes"}"#, r#"{"beds": 1}"#] {
        assert!(matches!(Checklist::parse(raw), Err(DomainError::Validation(_))), "{raw}");
    }
}

#[test]
fn status_codes_use_upper_snake_case() {
    assert_eq!("IN_PROGRESS".parse::<HousekeepingStatus>(), Ok(HousekeepingStatus::InProgress));
    assert_eq!("NIGHT".parse::<Shift>(), Ok(Shift::Night));
    assert_eq!(MaintenanceStatus::Resolved.to_string(), "RESOLVED");
    assert!("DONE".parse::<MaintenanceStatus>().is_err());
    assert!(Priority::Urgent > Priority::Low);
}
