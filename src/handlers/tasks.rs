use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::task::{
    Task, TaskEmployeeRow, TaskWithEmployee, DEFAULT_PRIORITY, DEFAULT_STATUS, DESCRIPTION_RULES,
    PRIORITY_RULES, STATUS_RULES, TITLE_RULES,
};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::validation::Violations;
use crate::AppState;

const TASK_WITH_EMPLOYEE_SELECT: &str =
    "SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date, t.employee_id, \
     t.created_at, t.updated_at, e.name AS employee_name, e.role AS employee_role, \
     e.email AS employee_email \
     FROM tasks t INNER JOIN employees e ON e.id = t.employee_id";

const TASK_SELECT: &str =
    "SELECT id, title, description, status, priority, due_date, employee_id, \
     created_at, updated_at FROM tasks";

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub employee_id: Option<i64>,
    /// Alias for `employeeId`; the canonical field wins when both are sent.
    pub employee: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub employee_id: Option<i64>,
    pub employee: Option<i64>,
}

/// GET /api/tasks?status=&employeeId= - filtered list, newest first, each
/// task carrying its assignee summary
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Vec<TaskWithEmployee>> {
    let employee_id = query
        .employee_id
        .as_deref()
        .map(parse_employee_ref)
        .transpose()?;

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(TASK_WITH_EMPLOYEE_SELECT);
    let mut sep = " WHERE ";
    if let Some(status) = &query.status {
        builder.push(sep).push("t.status = ").push_bind(status.clone());
        sep = " AND ";
    }
    if let Some(employee_id) = employee_id {
        builder.push(sep).push("t.employee_id = ").push_bind(employee_id);
    }
    builder.push(" ORDER BY t.created_at DESC, t.id DESC");

    let rows: Vec<TaskEmployeeRow> = builder.build_query_as().fetch_all(&state.pool).await?;
    let tasks: Vec<TaskWithEmployee> = rows.into_iter().map(TaskWithEmployee::from).collect();

    let count = tasks.len();
    Ok(ApiResponse::success(tasks).with_count(count))
}

/// GET /api/tasks/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TaskWithEmployee> {
    let id = parse_task_id(&id)?;
    let task = find_task_with_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(ApiResponse::success(task))
}

/// POST /api/tasks - create a task against a verified employee
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<TaskWithEmployee> {
    let title = payload.title.unwrap_or_default();
    let employee_id = match payload.employee_id.or(payload.employee) {
        Some(id) if !title.is_empty() => id,
        _ => return Err(ApiError::validation("Please provide title and employee ID")),
    };

    let mut violations = Violations::new();
    violations.check(Some(title.as_str()), TITLE_RULES);
    violations.check(payload.description.as_deref(), DESCRIPTION_RULES);
    violations.check(payload.status.as_deref(), STATUS_RULES);
    violations.check(payload.priority.as_deref(), PRIORITY_RULES);
    violations.into_result()?;

    ensure_employee_exists(&state.pool, employee_id).await?;

    let status = payload
        .status
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let priority = payload
        .priority
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO tasks (title, description, status, priority, due_date, employee_id, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&title)
    .bind(&payload.description)
    .bind(&status)
    .bind(&priority)
    .bind(payload.due_date)
    .bind(employee_id)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?;

    let task = find_task_with_employee(&state.pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| {
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;

    Ok(ApiResponse::created(task).with_message("Task created successfully"))
}

/// PUT /api/tasks/:id - partial update; a new assignee (either field name)
/// is verified to exist before the task is touched
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<TaskWithEmployee> {
    let id = parse_task_id(&id)?;
    let sql = format!("{} WHERE id = ?", TASK_SELECT);
    let existing = sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    let mut violations = Violations::new();
    violations.check(payload.title.as_deref(), TITLE_RULES);
    violations.check(payload.description.as_deref(), DESCRIPTION_RULES);
    violations.check(payload.status.as_deref(), STATUS_RULES);
    violations.check(payload.priority.as_deref(), PRIORITY_RULES);
    violations.into_result()?;

    let employee_id = match payload.employee_id.or(payload.employee) {
        Some(new_id) => {
            ensure_employee_exists(&state.pool, new_id).await?;
            new_id
        }
        None => existing.employee_id,
    };

    let title = payload.title.unwrap_or(existing.title);
    let description = payload.description.or(existing.description);
    let status = payload.status.unwrap_or(existing.status);
    let priority = payload.priority.unwrap_or(existing.priority);
    let due_date = payload.due_date.or(existing.due_date);

    sqlx::query(
        "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ?, due_date = ?, \
         employee_id = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&title)
    .bind(&description)
    .bind(&status)
    .bind(&priority)
    .bind(due_date)
    .bind(employee_id)
    .bind(Utc::now())
    .bind(id)
    .execute(&state.pool)
    .await?;

    let task = find_task_with_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(ApiResponse::success(task).with_message("Task updated successfully"))
}

/// DELETE /api/tasks/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_task_id(&id)?;
    let deleted = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Task not found"));
    }

    Ok(ApiResponse::success(json!({})).with_message("Task deleted successfully"))
}

fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid task ID"))
}

fn parse_employee_ref(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid employee ID"))
}

async fn ensure_employee_exists(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        return Err(ApiError::not_found("Employee not found"));
    }
    Ok(())
}

async fn find_task_with_employee(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<TaskWithEmployee>, ApiError> {
    let sql = format!("{} WHERE t.id = ?", TASK_WITH_EMPLOYEE_SELECT);
    let row = sqlx::query_as::<_, TaskEmployeeRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(TaskWithEmployee::from))
}
