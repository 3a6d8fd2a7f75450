use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        DomainResult,
        folio::{Folio, FolioItem, Payment, PaymentOutcome, PaymentStatus},
        task::StatusEvent,
    },
    dto::folios::{AddFolioItemRequest, AddPaymentRequest, FolioView, PaymentReceipt},
    entity::{
        folio_items::{ActiveModel as ItemActive, Column as ItemCol, Entity as FolioItems},
        folios::{ActiveModel as FolioActive, Entity as Folios, Model as FolioModel},
        payments::{ActiveModel as PaymentActive, Column as PaymentCol, Entity as Payments},
    },
    error::{AppError, AppResult},
    events::{EventSubject, append_status_event},
    middleware::actor::Actor,
    models::folio_from_entities,
    response::ApiResponse,
    state::AppState,
};

/// Loads the folio row with its items and payments. With `lock`, the folio
/// row is held `FOR UPDATE` until the surrounding transaction ends.
async fn load_folio<C>(conn: &C, id: Uuid, lock: bool) -> AppResult<(FolioModel, Folio)>
where
    C: ConnectionTrait,
{
    let mut finder = Folios::find_by_id(id);
    if lock {
        finder = finder.lock(LockType::Update);
    }
    let model = finder.one(conn).await?.ok_or(AppError::NotFound)?;

    let items = FolioItems::find()
        .filter(ItemCol::FolioId.eq(id))
        .order_by_asc(ItemCol::CreatedAt)
        .order_by_asc(ItemCol::Id)
        .all(conn)
        .await?;
    let payments = Payments::find()
        .filter(PaymentCol::FolioId.eq(id))
        .order_by_asc(PaymentCol::ReceivedAt)
        .order_by_asc(PaymentCol::Id)
        .all(conn)
        .await?;

    let folio = folio_from_entities(model.clone(), items, payments)?;
    Ok((model, folio))
}

pub async fn get_folio(state: &AppState, id: Uuid) -> AppResult<ApiResponse<FolioView>> {
    let (_, folio) = load_folio(&state.orm, id, false).await?;
    Ok(ApiResponse::item("OK", folio.into()))
}

pub async fn add_item(
    state: &AppState,
    id: Uuid,
    payload: AddFolioItemRequest,
) -> AppResult<ApiResponse<FolioView>> {
    let txn = state.orm.begin().await?;
    let (model, mut folio) = load_folio(&txn, id, true).await?;

    let item = FolioItem {
        id: Uuid::new_v4(),
        item_type: payload.item_type,
        description: payload.description.trim().to_string(),
        quantity: payload.quantity,
        unit_price: payload.unit_price,
        service_date: payload.service_date.unwrap_or_else(|| state.today()),
    };
    folio.add_item(item.clone())?;

    ItemActive {
        id: Set(item.id),
        folio_id: Set(id),
        item_type: Set(item.item_type.as_str().to_string()),
        description: Set(item.description.clone()),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        service_date: Set(item.service_date),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    touch(&txn, model).await?;

    txn.commit().await?;

    tracing::info!(folio_id = %id, item_id = %item.id, amount = item.amount(), "folio item posted");
    Ok(ApiResponse::item("Item added", folio.into()))
}

pub async fn add_payment(
    state: &AppState,
    id: Uuid,
    payload: AddPaymentRequest,
) -> AppResult<ApiResponse<PaymentReceipt>> {
    let txn = state.orm.begin().await?;
    let (model, mut folio) = load_folio(&txn, id, true).await?;

    let idempotency_key = payload
        .idempotency_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let payment = Payment {
        id: Uuid::new_v4(),
        method: payload.method,
        amount: payload.amount,
        currency: payload
            .currency
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|| folio.currency.clone()),
        status: payload.status.unwrap_or(PaymentStatus::Captured),
        provider: payload.provider,
        provider_ref: payload.provider_ref,
        idempotency_key,
        received_at: Utc::now(),
    };

    let outcome = folio.add_payment(payment.clone()).inspect_err(|err| {
        tracing::warn!(folio_id = %id, error = %err, "payment rejected");
    })?;

    let (payment_id, replayed) = match outcome {
        PaymentOutcome::Recorded => {
            PaymentActive {
                id: Set(payment.id),
                folio_id: Set(id),
                method: Set(payment.method.as_str().to_string()),
                amount: Set(payment.amount),
                currency: Set(payment.currency.clone()),
                status: Set(payment.status.as_str().to_string()),
                provider: Set(payment.provider.clone()),
                provider_ref: Set(payment.provider_ref.clone()),
                idempotency_key: Set(payment.idempotency_key.clone()),
                received_at: Set(payment.received_at.into()),
            }
            .insert(&txn)
            .await?;
            touch(&txn, model).await?;
            (payment.id, false)
        }
        PaymentOutcome::Replayed(existing) => (existing, true),
    };

    txn.commit().await?;

    if replayed {
        tracing::info!(folio_id = %id, payment_id = %payment_id, "payment replayed by idempotency key");
    } else {
        tracing::info!(folio_id = %id, payment_id = %payment_id, amount = payment.amount, "payment recorded");
    }

    let message = if replayed { "Payment already recorded" } else { "Payment recorded" };
    Ok(ApiResponse::item(
        message,
        PaymentReceipt {
            payment_id,
            replayed,
            folio: folio.into(),
        },
    ))
}

pub async fn close_folio(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<FolioView>> {
    finish(state, actor, id, Folio::close, "Folio closed").await
}

pub async fn void_folio(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<ApiResponse<FolioView>> {
    finish(state, actor, id, Folio::void, "Folio voided").await
}

async fn finish(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    action: fn(&mut Folio) -> DomainResult<()>,
    message: &'static str,
) -> AppResult<ApiResponse<FolioView>> {
    let txn = state.orm.begin().await?;
    let (model, mut folio) = load_folio(&txn, id, true).await?;

    if let Err(err) = action(&mut folio) {
        tracing::warn!(folio_id = %id, status = %folio.status, error = %err, "folio transition rejected");
        return Err(err.into());
    }

    let now = Utc::now();
    let mut active: FolioActive = model.into();
    active.status = Set(folio.status.as_str().to_string());
    active.updated_at = Set(now.into());
    active.update(&txn).await?;

    append_status_event(
        &txn,
        EventSubject::Folio,
        id,
        &StatusEvent {
            status: folio.status,
            changed_at: now,
            changed_by_user_id: actor.user_id,
        },
    )
    .await?;

    txn.commit().await?;

    tracing::info!(folio_id = %id, status = %folio.status, balance = folio.balance(), "folio finished");
    Ok(ApiResponse::item(message, folio.into()))
}

async fn touch<C: ConnectionTrait>(conn: &C, model: FolioModel) -> AppResult<()> {
    let mut active: FolioActive = model.into();
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await?;
    Ok(())
}
