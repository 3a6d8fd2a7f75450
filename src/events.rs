//! Append-only status history shared by every stateful entity.
//!
//! Rows are only ever inserted. Writes go through the caller's transaction so
//! the event commits together with the status change it records.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{db::DbPool, domain::task::StatusEvent, error::AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Reservation,
    Folio,
    HousekeepingTask,
    MaintenanceTicket,
}

impl EventSubject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventSubject::Reservation => "reservation",
            EventSubject::Folio => "folio",
            EventSubject::HousekeepingTask => "housekeeping_task",
            EventSubject::MaintenanceTicket => "maintenance_ticket",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusEventRecord {
    pub id: Uuid,
    pub status: String,
    pub changed_by_user_id: Uuid,
    pub changed_at: DateTime<Utc>,
}

pub async fn append_status_event<C, S>(
    conn: &C,
    subject: EventSubject,
    subject_id: Uuid,
    event: &StatusEvent<S>,
) -> AppResult<()>
where
    C: ConnectionTrait,
    S: std::fmt::Display,
{
    let statement = Statement::from_sql_and_values(
        conn.get_database_backend(),
        r#"
        INSERT INTO status_events (id, subject, subject_id, status, changed_by_user_id, changed_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
        [
            Uuid::new_v4().into(),
            subject.as_str().into(),
            subject_id.into(),
            event.status.to_string().into(),
            event.changed_by_user_id.into(),
            event.changed_at.into(),
        ],
    );
    conn.execute(statement).await?;
    Ok(())
}

/// History for one subject, oldest first.
pub async fn list_status_events(
    pool: &DbPool,
    subject: EventSubject,
    subject_id: Uuid,
) -> AppResult<Vec<StatusEventRecord>> {
    let rows = sqlx::query_as::<_, StatusEventRecord>(
        r#"
        SELECT id, status, changed_by_user_id, changed_at
        FROM status_events
        WHERE subject = $1 AND subject_id = $2
        ORDER BY changed_at ASC, id ASC
        "#,
    )
    .bind(subject.as_str())
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
