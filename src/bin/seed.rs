use chrono::{Days, Duration, NaiveDate, Utc};
use hotel_ops_api::{
    config::AppConfig,
    db::create_pool,
    domain::{
        dates::local_today,
        folio::FolioStatus,
        reservation::ReservationStatus,
        task::{Checklist, HousekeepingStatus, MaintenanceStatus, Priority, Shift},
    },
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let today = local_today(Utc::now(), config.utc_offset);
    let property_id = ensure_property(&pool, "Harbour View Hotel").await?;
    let rooms = seed_rooms(&pool, property_id, &["101", "102", "103", "201", "202", "301"]).await?;
    let staff_id = Uuid::new_v4();

    let in_house = seed_reservation(
        &pool,
        property_id,
        rooms[0],
        "HV-1001",
        ReservationStatus::CheckedIn,
        day(today, -2),
        day(today, 1),
    )
    .await?;
    seed_reservation(
        &pool,
        property_id,
        rooms[1],
        "HV-1002",
        ReservationStatus::Confirmed,
        today,
        day(today, 3),
    )
    .await?;
    seed_reservation(
        &pool,
        property_id,
        rooms[2],
        "HV-1003",
        ReservationStatus::CheckedIn,
        day(today, -3),
        today,
    )
    .await?;
    seed_reservation(
        &pool,
        property_id,
        rooms[3],
        "HV-1004",
        ReservationStatus::Hold,
        day(today, 5),
        day(today, 7),
    )
    .await?;

    if let Some(reservation_id) = in_house {
        seed_folio(&pool, reservation_id, &config.default_currency, today).await?;
    }
    seed_tasks(&pool, property_id, &rooms, today).await?;
    seed_ticket(&pool, property_id, rooms[4], staff_id).await?;

    println!("Seed completed. Property ID: {property_id}");
    Ok(())
}

fn day(today: NaiveDate, offset: i64) -> NaiveDate {
    if offset >= 0 {
        today.checked_add_days(Days::new(offset as u64)).unwrap_or(today)
    } else {
        today.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap_or(today)
    }
}

async fn ensure_property(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO properties (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_optional(pool)
    .await?;

    // If the property already exists, fetch id
    let property_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM properties WHERE name = $1")
                .bind(name)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured property {name}");
    Ok(property_id)
}

async fn seed_rooms(
    pool: &sqlx::PgPool,
    property_id: Uuid,
    numbers: &[&str],
) -> anyhow::Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(numbers.len());
    for number in numbers {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, property_id, number)
            VALUES ($1, $2, $3)
            ON CONFLICT (property_id, number) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(property_id)
        .bind(number)
        .execute(pool)
        .await?;

        let (id,): (Uuid,) =
            sqlx::query_as("SELECT id FROM rooms WHERE property_id = $1 AND number = $2")
                .bind(property_id)
                .bind(number)
                .fetch_one(pool)
                .await?;
        ids.push(id);
    }

    println!("Seeded {} rooms", ids.len());
    Ok(ids)
}

/// Returns the id only when the reservation was newly inserted.
async fn seed_reservation(
    pool: &sqlx::PgPool,
    property_id: Uuid,
    room_id: Uuid,
    code: &str,
    status: ReservationStatus,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> anyhow::Result<Option<Uuid>> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO reservations
            (id, code, property_id, room_id, status, check_in_date, check_out_date, adults, children, primary_guest_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 2, 0, $8)
        ON CONFLICT (code) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(code)
    .bind(property_id)
    .bind(room_id)
    .bind(status.as_str())
    .bind(check_in)
    .bind(check_out)
    .bind(Uuid::new_v4())
    .fetch_optional(pool)
    .await?;

    println!("Ensured reservation {code} ({status})");
    Ok(row.map(|(id,)| id))
}

async fn seed_folio(
    pool: &sqlx::PgPool,
    reservation_id: Uuid,
    currency: &str,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let folio_id = Uuid::new_v4();
    sqlx::query("INSERT INTO folios (id, reservation_id, status, currency) VALUES ($1, $2, $3, $4)")
        .bind(folio_id)
        .bind(reservation_id)
        .bind(FolioStatus::Open.as_str())
        .bind(currency)
        .execute(pool)
        .await?;

    let items = [
        ("ROOM_CHARGE", "Room night", 1, 12000_i64, day(today, -2)),
        ("ROOM_CHARGE", "Room night", 1, 12000, day(today, -1)),
        ("RESTAURANT", "Dinner", 2, 3500, day(today, -1)),
        ("MINIBAR", "Sparkling water", 3, 400, today),
    ];
    for (item_type, description, quantity, unit_price, service_date) in items {
        sqlx::query(
            r#"
            INSERT INTO folio_items (id, folio_id, item_type, description, quantity, unit_price, service_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(folio_id)
        .bind(item_type)
        .bind(description)
        .bind(quantity)
        .bind(unit_price)
        .bind(service_date)
        .execute(pool)
        .await?;
    }

    println!("Seeded folio {folio_id}");
    Ok(())
}

async fn seed_tasks(
    pool: &sqlx::PgPool,
    property_id: Uuid,
    rooms: &[Uuid],
    today: NaiveDate,
) -> anyhow::Result<()> {
    let mut checklist = Checklist::default();
    checklist.set("beds", false);
    checklist.set("bathroom", false);
    checklist.set("minibar", false);

    let overdue = Utc::now() - Duration::hours(1);
    let later = Utc::now() + Duration::hours(4);
    let plan = [
        (rooms[0], Shift::Am, HousekeepingStatus::Pending, Some(overdue)),
        (rooms[2], Shift::Am, HousekeepingStatus::InProgress, Some(later)),
        (rooms[5], Shift::Pm, HousekeepingStatus::Done, Some(overdue)),
    ];

    for (room_id, shift, status, due_at) in plan {
        sqlx::query(
            r#"
            INSERT INTO housekeeping_tasks (id, property_id, room_id, task_date, shift, status, checklist, due_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(property_id)
        .bind(room_id)
        .bind(today)
        .bind(shift.as_str())
        .bind(status.as_str())
        .bind(checklist.to_json_string())
        .bind(due_at)
        .execute(pool)
        .await?;
    }

    println!("Seeded {} housekeeping tasks", plan.len());
    Ok(())
}

async fn seed_ticket(
    pool: &sqlx::PgPool,
    property_id: Uuid,
    room_id: Uuid,
    reported_by: Uuid,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO maintenance_tickets (id, property_id, room_id, priority, status, description, reported_by_user_id, due_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(property_id)
    .bind(room_id)
    .bind(Priority::High.as_str())
    .bind(MaintenanceStatus::Open.as_str())
    .bind("Air conditioning is dripping")
    .bind(reported_by)
    .bind(Utc::now() + Duration::hours(24))
    .execute(pool)
    .await?;

    println!("Seeded maintenance ticket");
    Ok(())
}
