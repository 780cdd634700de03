use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

/// Bearer-token middleware guarding the mutating task routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).ok_or_else(|| {
        ApiError::unauthorized(
            "Not authorized to access this route. Please provide a valid token.",
        )
    })?;

    let claims = validate_token(&token, &state.config.security.jwt_secret)
        .map_err(|_| ApiError::unauthorized("Token is invalid or expired"))?;

    request.extensions_mut().insert(AuthUser {
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.trim().is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Validate the token signature and expiry, returning its claims
fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}
