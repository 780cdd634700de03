use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::models::employee::{
    Employee, EmployeeWithTasks, EMAIL_RULES, NAME_RULES, ROLE_RULES,
};
use crate::database::models::task::Task;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::validation::Violations;
use crate::AppState;

const EMPLOYEE_SELECT: &str =
    "SELECT id, name, role, email, created_at, updated_at FROM employees";

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

/// GET /api/employees - all employees, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let sql = format!("{} ORDER BY created_at DESC, id DESC", EMPLOYEE_SELECT);
    let employees = sqlx::query_as::<_, Employee>(&sql)
        .fetch_all(&state.pool)
        .await?;

    let count = employees.len();
    Ok(ApiResponse::success(employees).with_count(count))
}

/// GET /api/employees/:id - one employee with every task assigned to them
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmployeeWithTasks> {
    let id = parse_employee_id(&id)?;
    let employee = find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, priority, due_date, employee_id, \
         created_at, updated_at FROM tasks WHERE employee_id = ? \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(EmployeeWithTasks { employee, tasks }))
}

/// POST /api/employees - create an employee, rejecting duplicate emails
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> ApiResult<Employee> {
    let name = payload.name.unwrap_or_default();
    let role = payload.role.unwrap_or_default();
    let email = payload.email.unwrap_or_default();

    if name.is_empty() || role.is_empty() || email.is_empty() {
        return Err(ApiError::validation("Please provide name, role, and email"));
    }

    let mut violations = Violations::new();
    violations.check(Some(name.as_str()), NAME_RULES);
    violations.check(Some(role.as_str()), ROLE_RULES);
    violations.check(Some(email.as_str()), EMAIL_RULES);
    violations.into_result()?;

    let email = email.to_lowercase();
    if email_taken(&state.pool, &email).await? {
        return Err(ApiError::DuplicateEmail);
    }

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO employees (name, role, email, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&name)
    .bind(&role)
    .bind(&email)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?;

    let employee = find_employee(&state.pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| {
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;

    Ok(ApiResponse::created(employee).with_message("Employee created successfully"))
}

/// PUT /api/employees/:id - partial update; email uniqueness is re-checked
/// only when the email actually changes
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> ApiResult<Employee> {
    let id = parse_employee_id(&id)?;
    let existing = find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let mut violations = Violations::new();
    violations.check(payload.name.as_deref(), NAME_RULES);
    violations.check(payload.role.as_deref(), ROLE_RULES);
    violations.check(payload.email.as_deref(), EMAIL_RULES);
    violations.into_result()?;

    let email = payload.email.map(|email| email.to_lowercase());
    if let Some(email) = &email {
        if *email != existing.email && email_taken(&state.pool, email).await? {
            return Err(ApiError::DuplicateEmail);
        }
    }

    let name = payload.name.unwrap_or(existing.name);
    let role = payload.role.unwrap_or(existing.role);
    let email = email.unwrap_or(existing.email);

    sqlx::query("UPDATE employees SET name = ?, role = ?, email = ?, updated_at = ? WHERE id = ?")
        .bind(&name)
        .bind(&role)
        .bind(&email)
        .bind(Utc::now())
        .bind(id)
        .execute(&state.pool)
        .await?;

    let employee = find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(ApiResponse::success(employee).with_message("Employee updated successfully"))
}

/// DELETE /api/employees/:id - cascade delete: tasks first, then the
/// employee, inside one transaction
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_employee_id(&id)?;
    find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let mut tx = state.pool.begin().await?;
    sqlx::query("DELETE FROM tasks WHERE employee_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(ApiResponse::success(json!({}))
        .with_message("Employee and associated tasks deleted successfully"))
}

fn parse_employee_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid employee ID"))
}

async fn find_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, ApiError> {
    let sql = format!("{} WHERE id = ?", EMPLOYEE_SELECT);
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, ApiError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(existing.is_some())
}
