//! Seeds the tracker database with the demo data set: four employees and
//! eight tasks. Drops any existing tables first.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use task_tracker_api::config::AppConfig;
use task_tracker_api::database;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    let pool = database::connect(&config.database).await?;
    database::reset_schema(&pool).await?;
    println!("Cleared existing data");

    let employees = seed_employees(&pool).await?;
    println!("Created {} employees", employees.len());

    let task_count = seed_tasks(&pool, &employees).await?;
    println!("Created {} tasks", task_count);

    println!("\nDatabase seeded successfully!");
    println!("\nTest credentials for authentication:");
    println!("Email: {}", config.security.admin_email);
    println!("Password: {}", config.security.admin_password);

    Ok(())
}

async fn seed_employees(pool: &SqlitePool) -> Result<Vec<i64>> {
    const EMPLOYEES: &[(&str, &str, &str)] = &[
        ("Alice Johnson", "Frontend Developer", "alice@company.com"),
        ("Bob Smith", "Backend Developer", "bob@company.com"),
        ("Carol Williams", "UI/UX Designer", "carol@company.com"),
        ("David Brown", "Full Stack Developer", "david@company.com"),
    ];

    let now = Utc::now();
    let mut ids = Vec::with_capacity(EMPLOYEES.len());
    for (name, role, email) in EMPLOYEES {
        let result = sqlx::query(
            "INSERT INTO employees (name, role, email, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(role)
        .bind(email)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
        ids.push(result.last_insert_rowid());
    }

    Ok(ids)
}

async fn seed_tasks(pool: &SqlitePool, employees: &[i64]) -> Result<usize> {
    let tasks = [
        (
            "Build login page",
            "Create responsive login form with validation",
            "Completed",
            "High",
            employees[0],
        ),
        (
            "Implement dashboard",
            "Build main dashboard with statistics",
            "In Progress",
            "High",
            employees[0],
        ),
        (
            "API integration",
            "Integrate third-party payment API",
            "Pending",
            "Medium",
            employees[1],
        ),
        (
            "Database optimization",
            "Optimize database queries and indexes",
            "In Progress",
            "High",
            employees[1],
        ),
        (
            "Design landing page",
            "Create modern landing page design",
            "Completed",
            "Medium",
            employees[2],
        ),
        (
            "Create wireframes",
            "Design wireframes for mobile app",
            "Pending",
            "Low",
            employees[2],
        ),
        (
            "Setup CI/CD pipeline",
            "Configure automated deployment pipeline",
            "Pending",
            "Medium",
            employees[3],
        ),
        (
            "Code review",
            "Review pull requests and provide feedback",
            "In Progress",
            "Medium",
            employees[3],
        ),
    ];

    let now = Utc::now();
    for (title, description, status, priority, employee_id) in &tasks {
        sqlx::query(
            "INSERT INTO tasks (title, description, status, priority, employee_id, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(priority)
        .bind(employee_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
    }

    Ok(tasks.len())
}
