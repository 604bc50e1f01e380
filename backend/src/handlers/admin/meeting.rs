use axum::{extract::State, Json};

use crate::{
    error::AppError,
    models::meeting::{MeetingCredentials, UpdateMeetingCredentialsRequest},
    services::settings::upsert_meeting_credentials,
    state::AppState,
};

pub async fn get_meeting_credentials(
    State(state): State<AppState>,
) -> Result<Json<Option<MeetingCredentials>>, AppError> {
    Ok(Json(state.meeting_credentials().get().await?))
}

pub async fn put_meeting_credentials(
    State(state): State<AppState>,
    Json(payload): Json<UpdateMeetingCredentialsRequest>,
) -> Result<Json<MeetingCredentials>, AppError> {
    let updated = upsert_meeting_credentials(&state.meeting_credentials(), &payload).await?;
    Ok(Json(updated))
}
