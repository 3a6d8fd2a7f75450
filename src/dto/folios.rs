use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::folio::{Folio, FolioItemType, PaymentMethod, PaymentStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFolioItemRequest {
    #[serde(rename = "type")]
    pub item_type: FolioItemType,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    /// Defaults to the property's current date.
    pub service_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentRequest {
    pub method: PaymentMethod,
    pub amount: i64,
    /// Defaults to the folio currency.
    pub currency: Option<String>,
    /// Defaults to CAPTURED.
    pub status: Option<PaymentStatus>,
    pub provider: Option<String>,
    pub provider_ref: Option<String>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolioView {
    #[serde(flatten)]
    pub folio: Folio,
    pub total: i64,
    pub captured: i64,
    pub balance: i64,
}

impl From<Folio> for FolioView {
    fn from(folio: Folio) -> Self {
        Self {
            total: folio.total(),
            captured: folio.captured(),
            balance: folio.balance(),
            folio,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment_id: Uuid,
    /// True when the idempotency key matched an identical earlier payment.
    pub replayed: bool,
    pub folio: FolioView,
}
