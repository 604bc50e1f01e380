use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::AppError,
    models::session_code::{SessionCode, UpsertSessionCodeRequest, UpsertSessionCodeResponse},
    services::settings::upsert_session_code,
    state::AppState,
};

pub async fn list_session_codes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionCode>>, AppError> {
    Ok(Json(state.session_codes().list_all().await?))
}

pub async fn put_session_code(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<UpsertSessionCodeRequest>,
) -> Result<(StatusCode, Json<UpsertSessionCodeResponse>), AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Date must be in YYYY-MM-DD format".into()))?;

    let response = upsert_session_code(&state.session_codes(), date, &payload.code).await?;
    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}
