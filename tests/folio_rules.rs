use chrono::{NaiveDate, Utc};
use hotel_ops_api::domain::{
    DomainError,
    folio::{
        Folio, FolioItem, FolioItemType, FolioStatus, MAX_FOLIO_AMOUNT, Payment, PaymentMethod,
        PaymentOutcome, PaymentStatus,
    },
};
use uuid::Uuid;

fn item(quantity: i32, unit_price: i64) -> FolioItem {
    FolioItem {
        id: Uuid::new_v4(),
        item_type: FolioItemType::RoomCharge,
        description: "Room night".into(),
        quantity,
        unit_price,
        service_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
    }
}

fn payment(amount: i64, status: PaymentStatus, key: Option<&str>) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        method: PaymentMethod::Card,
        amount,
        currency: "USD".into(),
        status,
        provider: Some("stripe".into()),
        provider_ref: Some("ch_1".into()),
        idempotency_key: key.map(str::to_owned),
        received_at: Utc::now(),
    }
}

fn open_folio() -> Folio {
    Folio::new(Uuid::new_v4(), Uuid::new_v4(), "USD")
}

#[test]
fn balance_is_total_minus_captured_payments() {
    let mut folio = open_folio();
    folio.add_item(item(2, 50)).expect("add item");
    folio
        .add_payment(payment(80, PaymentStatus::Captured, None))
        .expect("add payment");

    assert_eq!(folio.total(), 100);
    assert_eq!(folio.balance(), 20);
}

#[test]
fn uncaptured_payments_do_not_reduce_balance() {
    let mut folio = open_folio();
    folio.add_item(item(1, 100)).expect("add item");
    folio
        .add_payment(payment(40, PaymentStatus::Pending, None))
        .expect("pending");
    folio
        .add_payment(payment(30, PaymentStatus::Failed, None))
        .expect("failed");

    assert_eq!(folio.captured(), 0);
    assert_eq!(folio.balance(), 100);
}

#[test]
fn overpayment_is_allowed_and_shows_negative_balance() {
    let mut folio = open_folio();
    folio.add_item(item(1, 50)).expect("add item");
    folio
        .add_payment(payment(75, PaymentStatus::Captured, None))
        .expect("overpay");
    assert_eq!(folio.balance(), -25);
}

#[test]
fn closed_folio_rejects_items_and_payments() {
    let mut folio = open_folio();
    folio.close().expect("close");
    assert_eq!(folio.status, FolioStatus::Closed);

    let err = folio.add_item(item(1, 10)).expect_err("item on closed folio");
    assert!(matches!(err, DomainError::FolioClosed { .. }));

    let err = folio
        .add_payment(payment(10, PaymentStatus::Captured, None))
        .expect_err("payment on closed folio");
    assert!(matches!(err, DomainError::FolioClosed { .. }));

    assert!(folio.items.is_empty());
    assert!(folio.payments.is_empty());
}

#[test]
fn second_close_fails_with_already_closed() {
    let mut folio = open_folio();
    folio.close().expect("first close");
    let err = folio.close().expect_err("second close");
    assert!(matches!(err, DomainError::AlreadyClosed { .. }));
    assert_eq!(folio.status, FolioStatus::Closed);
}

#[test]
fn void_is_one_way_too() {
    let mut folio = open_folio();
    folio.void().expect("void");
    assert_eq!(folio.status, FolioStatus::Void);
    assert!(matches!(folio.close(), Err(DomainError::AlreadyClosed { .. })));
    assert!(matches!(
        folio.add_item(item(1, 10)),
        Err(DomainError::FolioClosed { .. })
    ));
}

#[test]
fn repeated_idempotency_key_with_same_payload_is_a_no_op() {
    let mut folio = open_folio();
    let first = payment(50, PaymentStatus::Captured, Some("key-1"));
    let first_id = first.id;
    assert_eq!(folio.add_payment(first).expect("first"), PaymentOutcome::Recorded);

    let retry = payment(50, PaymentStatus::Captured, Some("key-1"));
    assert_eq!(
        folio.add_payment(retry).expect("retry"),
        PaymentOutcome::Replayed(first_id)
    );
    assert_eq!(folio.payments.len(), 1);
    assert_eq!(folio.captured(), 50);
}

#[test]
fn reused_idempotency_key_with_different_payload_is_rejected() {
    let mut folio = open_folio();
    folio
        .add_payment(payment(50, PaymentStatus::Captured, Some("key-1")))
        .expect("first");

    let err = folio
        .add_payment(payment(60, PaymentStatus::Captured, Some("key-1")))
        .expect_err("conflicting payload");
    assert_eq!(err, DomainError::DuplicatePayment { key: "key-1".into() });
    assert_eq!(folio.payments.len(), 1);
}

#[test]
fn payments_without_key_are_never_deduplicated() {
    let mut folio = open_folio();
    folio
        .add_payment(payment(50, PaymentStatus::Captured, None))
        .expect("first");
    folio
        .add_payment(payment(50, PaymentStatus::Captured, None))
        .expect("second");
    assert_eq!(folio.payments.len(), 2);
}

#[test]
fn malformed_items_and_payments_are_validation_errors() {
    let mut folio = open_folio();
    assert!(matches!(folio.add_item(item(0, 10)), Err(DomainError::Validation(_))));
    assert!(matches!(folio.add_item(item(-1, 10)), Err(DomainError::Validation(_))));
    assert!(matches!(folio.add_item(item(1, -5)), Err(DomainError::Validation(_))));
    assert!(matches!(
        folio.add_payment(payment(0, PaymentStatus::Captured, None)),
        Err(DomainError::Validation(_))
    ));

    let mut euros = payment(10, PaymentStatus::Captured, None);
    euros.currency = "EUR".into();
    assert!(matches!(folio.add_payment(euros), Err(DomainError::Validation(_))));

    assert!(folio.items.is_empty());
    assert!(folio.payments.is_empty());
}

#[test]
fn item_type_serializes_as_type_field() {
    let json = serde_json::to_value(item(1, 10)).expect("serialize");
    assert_eq!(json["type"], "ROOM_CHARGE");
    assert_eq!(json["unitPrice"], 10);
}

#[test]
fn item_whose_amount_overflows_is_rejected() {
    let mut folio = open_folio();
    let err = folio
        .add_item(item(2, i64::MAX / 2 + 1))
        .expect_err("line amount does not fit");
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(folio.items.is_empty());
    assert_eq!(folio.total(), 0);
    assert_eq!(folio.balance(), 0);
}

#[test]
fn running_charge_total_is_capped() {
    let mut folio = open_folio();
    folio.add_item(item(1, MAX_FOLIO_AMOUNT)).expect("at the limit");
    let err = folio.add_item(item(1, 1)).expect_err("past the limit");
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(folio.items.len(), 1);
    assert_eq!(folio.total(), MAX_FOLIO_AMOUNT);
}

#[test]
fn large_payments_cannot_overflow_captured_sum() {
    let mut folio = open_folio();
    let err = folio
        .add_payment(payment(i64::MAX - 1, PaymentStatus::Captured, None))
        .expect_err("single payment over the limit");
    assert!(matches!(err, DomainError::Validation(_)));

    folio
        .add_payment(payment(MAX_FOLIO_AMOUNT, PaymentStatus::Captured, None))
        .expect("at the limit");
    let err = folio
        .add_payment(payment(MAX_FOLIO_AMOUNT, PaymentStatus::Captured, None))
        .expect_err("running sum past the limit");
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(folio.captured(), MAX_FOLIO_AMOUNT);
    assert_eq!(folio.balance(), -MAX_FOLIO_AMOUNT);
}

#[test]
fn replay_at_the_limit_is_still_a_replay() {
    let mut folio = open_folio();
    let first = payment(MAX_FOLIO_AMOUNT, PaymentStatus::Captured, Some("big"));
    let first_id = first.id;
    folio.add_payment(first).expect("first");
    let retry = payment(MAX_FOLIO_AMOUNT, PaymentStatus::Captured, Some("big"));
    assert_eq!(
        folio.add_payment(retry).expect("retry"),
        PaymentOutcome::Replayed(first_id)
    );
}

#[test]
fn stored_rows_beyond_limits_never_panic_on_read() {
    // Rows loaded from storage bypass add_item/add_payment.
    let mut folio = open_folio();
    folio.items.push(item(2, i64::MAX / 2 + 1));
    folio.items.push(item(1, i64::MAX));
    folio.payments.push(payment(i64::MAX, PaymentStatus::Captured, None));
    folio.payments.push(payment(i64::MAX, PaymentStatus::Captured, None));

    assert_eq!(folio.total(), i64::MAX);
    assert_eq!(folio.captured(), i64::MAX);
    assert_eq!(folio.balance(), 0);
}
