use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use config::AppConfig;

/// Shared state handed to every handler: the store pool and the runtime
/// configuration, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // API routes
        .merge(auth_routes())
        .merge(employee_routes())
        .merge(task_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new().route("/api/auth/login", post(auth::login))
}

fn employee_routes() -> Router<AppState> {
    use handlers::employees;

    Router::new()
        .route(
            "/api/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/api/employees/:id",
            get(employees::get)
                .put(employees::update)
                .delete(employees::remove),
        )
}

fn task_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{post, put};
    use handlers::tasks;

    // Reads are open; mutations sit behind the bearer-token gate.
    let public = Router::new()
        .route("/api/tasks", get(tasks::list))
        .route("/api/tasks/:id", get(tasks::get));

    let protected = Router::new()
        .route("/api/tasks", post(tasks::create))
        .route("/api/tasks/:id", put(tasks::update).delete(tasks::remove))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ));

    public.merge(protected)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "message": "Employee Task Tracker API",
        "version": version,
        "endpoints": {
            "auth": "POST /api/auth/login",
            "employees": "/api/employees[/:id]",
            "tasks": "/api/tasks[/:id] (mutations require a bearer token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
