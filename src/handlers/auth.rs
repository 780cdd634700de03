use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_token, Claims};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - exchange the fixed credential pair for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Please provide email and password"));
    }

    let security = &state.config.security;
    if email != security.admin_email || password != security.admin_password {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(email, security.jwt_expiry_hours);
    let token = generate_token(&claims, &security.jwt_secret).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Server error")
    })?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "message": "Login successful",
    })))
}
