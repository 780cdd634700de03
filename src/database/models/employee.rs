use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{FieldRule, Rule};

use super::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of employee fields embedded in task responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
}

/// Employee detail response: the employee plus everything assigned to them.
#[derive(Debug, Serialize)]
pub struct EmployeeWithTasks {
    #[serde(flatten)]
    pub employee: Employee,
    pub tasks: Vec<Task>,
}

pub const NAME_RULES: &[FieldRule] = &[
    FieldRule {
        rule: Rule::NotEmpty,
        message: "Employee name is required",
    },
    FieldRule {
        rule: Rule::Length { min: 2, max: 100 },
        message: "Name must be between 2 and 100 characters",
    },
];

pub const ROLE_RULES: &[FieldRule] = &[
    FieldRule {
        rule: Rule::NotEmpty,
        message: "Employee role is required",
    },
    FieldRule {
        rule: Rule::Length { min: 1, max: 100 },
        message: "Role cannot exceed 100 characters",
    },
];

pub const EMAIL_RULES: &[FieldRule] = &[
    FieldRule {
        rule: Rule::NotEmpty,
        message: "Email is required",
    },
    FieldRule {
        rule: Rule::Email,
        message: "Please provide a valid email address",
    },
];
