//! Folio lifecycle: a running bill that accepts charges and payments only
//! while OPEN. Closing and voiding are one-way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

/// Upper bound, in minor units, for a line amount, a payment, and the running
/// charge and payment totals of one folio. Keeps every sum over a folio, and
/// over many folios, inside `i64`.
pub const MAX_FOLIO_AMOUNT: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolioStatus {
    Open,
    Closed,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolioItemType {
    RoomCharge,
    Restaurant,
    Minibar,
    Laundry,
    Misc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Captured,
    Failed,
    Refunded,
}

string_codes!(FolioStatus, "folio status", {
    Open => "OPEN",
    Closed => "CLOSED",
    Void => "VOID",
});

string_codes!(FolioItemType, "folio item type", {
    RoomCharge => "ROOM_CHARGE",
    Restaurant => "RESTAURANT",
    Minibar => "MINIBAR",
    Laundry => "LAUNDRY",
    Misc => "MISC",
});

string_codes!(PaymentMethod, "payment method", {
    Card => "CARD",
    Cash => "CASH",
    Transfer => "TRANSFER",
});

string_codes!(PaymentStatus, "payment status", {
    Pending => "PENDING",
    Captured => "CAPTURED",
    Failed => "FAILED",
    Refunded => "REFUNDED",
});

/// A charge line. Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolioItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: FolioItemType,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub service_date: NaiveDate,
}

impl FolioItem {
    /// `quantity * unit_price`, or `None` when it does not fit in `i64`.
    pub fn checked_amount(&self) -> Option<i64> {
        i64::from(self.quantity).checked_mul(self.unit_price)
    }

    /// Line amount. Saturates for items that never passed [`FolioItem::validate`].
    pub fn amount(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(self.unit_price)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 1 {
            return Err(DomainError::validation("item quantity must be at least 1"));
        }
        if self.unit_price < 0 {
            return Err(DomainError::validation("item unit price must not be negative"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("item description must not be empty"));
        }
        match self.checked_amount() {
            Some(amount) if amount <= MAX_FOLIO_AMOUNT => Ok(()),
            _ => Err(DomainError::validation(format!(
                "item amount must not exceed {MAX_FOLIO_AMOUNT}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub method: PaymentMethod,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub provider: Option<String>,
    pub provider_ref: Option<String>,
    pub idempotency_key: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Payment {
    /// Compares what the caller asked for, ignoring server-assigned fields.
    pub fn same_payload(&self, other: &Payment) -> bool {
        self.method == other.method
            && self.amount == other.amount
            && self.currency == other.currency
            && self.status == other.status
            && self.provider == other.provider
            && self.provider_ref == other.provider_ref
    }
}

/// Result of [`Folio::add_payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded,
    /// Same idempotency key and payload as an earlier payment; nothing added.
    Replayed(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Folio {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub status: FolioStatus,
    pub currency: String,
    pub items: Vec<FolioItem>,
    pub payments: Vec<Payment>,
}

impl Folio {
    pub fn new(id: Uuid, reservation_id: Uuid, currency: impl Into<String>) -> Self {
        Self {
            id,
            reservation_id,
            status: FolioStatus::Open,
            currency: currency.into(),
            items: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == FolioStatus::Open
    }

    fn ensure_open(&self) -> DomainResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::FolioClosed {
                status: self.status.to_string(),
            })
        }
    }

    pub fn add_item(&mut self, item: FolioItem) -> DomainResult<()> {
        self.ensure_open()?;
        item.validate()?;
        within_limit(self.total(), item.amount(), "folio charges")?;
        self.items.push(item);
        Ok(())
    }

    pub fn add_payment(&mut self, payment: Payment) -> DomainResult<PaymentOutcome> {
        self.ensure_open()?;
        if payment.amount <= 0 {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if payment.amount > MAX_FOLIO_AMOUNT {
            return Err(DomainError::validation(format!(
                "payment amount must not exceed {MAX_FOLIO_AMOUNT}"
            )));
        }
        if payment.currency != self.currency {
            return Err(DomainError::validation(format!(
                "payment currency {} does not match folio currency {}",
                payment.currency, self.currency
            )));
        }

        if let Some(key) = payment.idempotency_key.as_deref() {
            let earlier = self
                .payments
                .iter()
                .find(|p| p.idempotency_key.as_deref() == Some(key));
            if let Some(earlier) = earlier {
                if earlier.same_payload(&payment) {
                    return Ok(PaymentOutcome::Replayed(earlier.id));
                }
                return Err(DomainError::DuplicatePayment {
                    key: key.to_string(),
                });
            }
        }

        let paid = sum_amounts(self.payments.iter().map(|p| p.amount));
        within_limit(paid, payment.amount, "folio payments")?;
        self.payments.push(payment);
        Ok(PaymentOutcome::Recorded)
    }

    fn finish(&mut self, to: FolioStatus) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::AlreadyClosed {
                status: self.status.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// OPEN -> CLOSED. There is no way back.
    pub fn close(&mut self) -> DomainResult<()> {
        self.finish(FolioStatus::Closed)
    }

    /// OPEN -> VOID. There is no way back.
    pub fn void(&mut self) -> DomainResult<()> {
        self.finish(FolioStatus::Void)
    }

    pub fn total(&self) -> i64 {
        sum_amounts(self.items.iter().map(FolioItem::amount))
    }

    pub fn captured(&self) -> i64 {
        let captured = self
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Captured)
            .map(|p| p.amount);
        sum_amounts(captured)
    }

    /// Charges minus captured payments. Negative means overpaid.
    pub fn balance(&self) -> i64 {
        self.total().saturating_sub(self.captured())
    }
}

/// Saturating sum; stored rows are trusted only as far as `i64` goes.
pub fn sum_amounts(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}

fn within_limit(current: i64, added: i64, what: &str) -> DomainResult<()> {
    match current.checked_add(added) {
        Some(next) if next <= MAX_FOLIO_AMOUNT => Ok(()),
        _ => Err(DomainError::validation(format!(
            "{what} would exceed {MAX_FOLIO_AMOUNT}"
        ))),
    }
}
