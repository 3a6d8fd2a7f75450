use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    domain::{
        DomainResult,
        task::{HousekeepingTask, change_status, is_overdue},
        views::housekeeping_board,
    },
    dto::housekeeping::{HousekeepingBoard, StatusEventList, TaskList, TaskView, UpdateTaskRequest},
    entity::{
        housekeeping_tasks::{ActiveModel as TaskActive, Column as TaskCol, Entity as HousekeepingTasks},
        rooms::{Column as RoomCol, Entity as Rooms},
    },
    error::{AppError, AppResult},
    events::{EventSubject, append_status_event, list_status_events},
    middleware::actor::Actor,
    models::{room_label_from_entity, task_from_entity},
    response::{ApiResponse, Meta},
    routes::params::{BoardQuery, TaskListQuery},
    state::AppState,
};

fn task_view(task: HousekeepingTask) -> TaskView {
    // Overdue depends on the current time, so it is never stored.
    let overdue = is_overdue(&task, Utc::now());
    TaskView { task, overdue }
}

pub async fn list_tasks(
    state: &AppState,
    query: TaskListQuery,
) -> AppResult<ApiResponse<TaskList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(property_id) = query.property_id {
        condition = condition.add(TaskCol::PropertyId.eq(property_id));
    }
    if let Some(date) = query.date {
        condition = condition.add(TaskCol::TaskDate.eq(date));
    }
    if let Some(status) = query.status {
        condition = condition.add(TaskCol::Status.eq(status.as_str()));
    }

    let finder = HousekeepingTasks::find()
        .filter(condition)
        .order_by_desc(TaskCol::TaskDate)
        .order_by_asc(TaskCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| task_from_entity(model).map(task_view))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ok",
        TaskList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn board(
    state: &AppState,
    query: BoardQuery,
) -> AppResult<ApiResponse<HousekeepingBoard>> {
    let date = query.date.unwrap_or_else(|| state.today());

    let tasks = HousekeepingTasks::find()
        .filter(TaskCol::PropertyId.eq(query.property_id))
        .filter(TaskCol::TaskDate.eq(date))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(task_from_entity)
        .collect::<DomainResult<Vec<_>>>()?;

    let rooms: Vec<_> = Rooms::find()
        .filter(RoomCol::PropertyId.eq(query.property_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(room_label_from_entity)
        .collect();

    let items = housekeeping_board(
        &tasks,
        &rooms,
        query.property_id,
        date,
        query.shift,
        Utc::now(),
    );
    let meta = Meta::total(items.len());

    Ok(ApiResponse::success(
        "Housekeeping board",
        HousekeepingBoard {
            property_id: query.property_id,
            date,
            items,
        },
        Some(meta),
    ))
}

pub async fn update_task(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
    payload: UpdateTaskRequest,
) -> AppResult<ApiResponse<TaskView>> {
    let txn = state.orm.begin().await?;

    let model = HousekeepingTasks::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut task = task_from_entity(model.clone())?;

    let now = Utc::now();
    let event = payload
        .status
        .and_then(|to| change_status(&mut task, to, actor.user_id, now));
    if let Some(employee_id) = payload.assigned_to_employee_id {
        task.assign(employee_id);
    }
    if let Some(checklist) = payload.checklist {
        task.checklist = checklist;
    }
    if let Some(due_at) = payload.due_at {
        task.due_at = Some(due_at);
    }
    if let Some(notes) = payload.notes {
        task.notes = Some(notes.trim().to_string()).filter(|n| !n.is_empty());
    }

    let mut active: TaskActive = model.into();
    active.status = Set(task.status.as_str().to_string());
    active.assigned_to_employee_id = Set(task.assigned_to_employee_id);
    active.checklist = Set(task.checklist.to_json_string());
    active.due_at = Set(task.due_at.map(Into::into));
    active.notes = Set(task.notes.clone());
    active.updated_at = Set(now.into());
    active.update(&txn).await?;

    if let Some(event) = &event {
        append_status_event(&txn, EventSubject::HousekeepingTask, id, event).await?;
    }

    txn.commit().await?;

    if let Some(event) = &event {
        tracing::info!(task_id = %id, status = %event.status, user_id = %actor.user_id, "housekeeping status changed");
    }

    Ok(ApiResponse::item("Task updated", task_view(task)))
}

pub async fn task_events(state: &AppState, id: Uuid) -> AppResult<ApiResponse<StatusEventList>> {
    let exists = HousekeepingTasks::find_by_id(id).count(&state.orm).await? > 0;
    if !exists {
        return Err(AppError::NotFound);
    }

    let items = list_status_events(&state.pool, EventSubject::HousekeepingTask, id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", StatusEventList { items }, Some(meta)))
}
