use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{FieldRule, Rule};

use super::employee::EmployeeSummary;

pub const TASK_STATUSES: &[&str] = &["Pending", "In Progress", "Completed"];
pub const TASK_PRIORITIES: &[&str] = &["Low", "Medium", "High"];

pub const DEFAULT_STATUS: &str = "Pending";
pub const DEFAULT_PRIORITY: &str = "Medium";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub employee_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task response shape: the task plus a summary of its assignee.
#[derive(Debug, Serialize)]
pub struct TaskWithEmployee {
    #[serde(flatten)]
    pub task: Task,
    pub employee: EmployeeSummary,
}

/// Flat row produced by the task/employee join, split into the nested shape.
#[derive(Debug, FromRow)]
pub struct TaskEmployeeRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub employee_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_role: String,
    pub employee_email: String,
}

impl From<TaskEmployeeRow> for TaskWithEmployee {
    fn from(row: TaskEmployeeRow) -> Self {
        Self {
            employee: EmployeeSummary {
                id: row.employee_id,
                name: row.employee_name,
                role: row.employee_role,
                email: row.employee_email,
            },
            task: Task {
                id: row.id,
                title: row.title,
                description: row.description,
                status: row.status,
                priority: row.priority,
                due_date: row.due_date,
                employee_id: row.employee_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

pub const TITLE_RULES: &[FieldRule] = &[
    FieldRule {
        rule: Rule::NotEmpty,
        message: "Task title is required",
    },
    FieldRule {
        rule: Rule::Length { min: 3, max: 200 },
        message: "Title must be between 3 and 200 characters",
    },
];

pub const DESCRIPTION_RULES: &[FieldRule] = &[FieldRule {
    rule: Rule::Length { min: 0, max: 1000 },
    message: "Description cannot exceed 1000 characters",
}];

pub const STATUS_RULES: &[FieldRule] = &[FieldRule {
    rule: Rule::OneOf(TASK_STATUSES),
    message: "Status must be: Pending, In Progress, or Completed",
}];

pub const PRIORITY_RULES: &[FieldRule] = &[FieldRule {
    rule: Rule::OneOf(TASK_PRIORITIES),
    message: "Priority must be: Low, Medium, or High",
}];
