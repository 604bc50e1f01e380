use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::admin::{AdminLoginRequest, AdminLoginResponse, AdminSessionResponse},
    state::AppState,
    utils::jwt::{create_access_token, Claims},
};

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    payload.validate()?;

    let username_ok = constant_time_eq(
        payload.username.trim().as_bytes(),
        state.config.admin_username.as_bytes(),
    );
    let password_ok = constant_time_eq(
        payload.password.as_bytes(),
        state.config.admin_password.as_bytes(),
    );
    if !(username_ok && password_ok) {
        tracing::warn!(username = %payload.username, "Admin login failed");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let claims = Claims::new(
        state.config.admin_username.clone(),
        state.config.jwt_expiration_hours,
    );
    let access_token = create_access_token(&claims, &state.config.jwt_secret)?;
    tracing::info!(username = %claims.sub, "Admin logged in");

    Ok(Json(AdminLoginResponse {
        access_token,
        token_type: "Bearer".into(),
        expires_at: claims.expires_at(),
        username: claims.sub,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Value> {
    state
        .revoked_tokens
        .revoke(&claims.jti, claims.exp, Utc::now().timestamp());
    tracing::info!(username = %claims.sub, "Admin logged out");
    Json(json!({ "message": "Logged out" }))
}

pub async fn session(Extension(claims): Extension<Claims>) -> Json<AdminSessionResponse> {
    Json(AdminSessionResponse {
        expires_at: claims.expires_at(),
        username: claims.sub,
    })
}
