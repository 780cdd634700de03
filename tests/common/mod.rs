#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{ensure, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use task_tracker_api::config::{AppConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use task_tracker_api::{app, database, AppState};

pub const TEST_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@company.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Build the full router against a fresh in-memory store.
pub async fn test_app() -> Router {
    // A single connection keeps every request on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    database::init_schema(&pool).await.expect("schema");

    let config = AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_hours: 24,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
        },
    };

    app(AppState {
        pool,
        config: Arc::new(config),
    })
}

/// Drive one request through the router and decode the JSON envelope.
pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}

pub async fn get(app: &Router, path: &str) -> Result<(StatusCode, Value)> {
    request(app, "GET", path, None, None).await
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, "POST", path, Some(body), None).await
}

pub async fn put_json(app: &Router, path: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, "PUT", path, Some(body), None).await
}

pub async fn post_authed(
    app: &Router,
    path: &str,
    body: Value,
    token: &str,
) -> Result<(StatusCode, Value)> {
    request(app, "POST", path, Some(body), Some(token)).await
}

pub async fn put_authed(
    app: &Router,
    path: &str,
    body: Value,
    token: &str,
) -> Result<(StatusCode, Value)> {
    request(app, "PUT", path, Some(body), Some(token)).await
}

pub async fn delete(app: &Router, path: &str) -> Result<(StatusCode, Value)> {
    request(app, "DELETE", path, None, None).await
}

pub async fn delete_authed(app: &Router, path: &str, token: &str) -> Result<(StatusCode, Value)> {
    request(app, "DELETE", path, None, Some(token)).await
}

/// Log in with the demo credentials and return the bearer token.
pub async fn login(app: &Router) -> Result<String> {
    let (status, body) = post_json(
        app,
        "/api/auth/login",
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await?;
    ensure!(status == StatusCode::OK, "login failed: {body}");

    Ok(body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string())
}

/// Create an employee through the API and return its id.
pub async fn create_employee(
    app: &Router,
    name: &str,
    role: &str,
    email: &str,
) -> Result<i64> {
    let (status, body) = post_json(
        app,
        "/api/employees",
        json!({ "name": name, "role": role, "email": email }),
    )
    .await?;
    ensure!(status == StatusCode::CREATED, "create employee failed: {body}");

    Ok(body["data"]["id"].as_i64().expect("employee id"))
}

/// Create a task through the API and return its id.
pub async fn create_task(
    app: &Router,
    token: &str,
    title: &str,
    employee_id: i64,
    extra: Value,
) -> Result<i64> {
    let mut body = json!({ "title": title, "employeeId": employee_id });
    if let (Some(target), Some(source)) = (body.as_object_mut(), extra.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }

    let (status, body) = post_authed(app, "/api/tasks", body, token).await?;
    ensure!(status == StatusCode::CREATED, "create task failed: {body}");

    Ok(body["data"]["id"].as_i64().expect("task id"))
}
