use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppError,
    models::student::{NextStudentIdResponse, RegisterStudentRequest, RegistrationResponse},
    services::registration::{preview_next_id, register_student},
    state::AppState,
};

pub async fn next_student_id(
    State(state): State<AppState>,
) -> Result<Json<NextStudentIdResponse>, AppError> {
    let student_id = preview_next_id(&state.students()).await?;
    Ok(Json(NextStudentIdResponse { student_id }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    payload.validate()?;
    let (student_name, telegram_username) = payload.normalized();

    let student = register_student(&state.students(), &student_name, &telegram_username).await?;

    // The student exists at this point; missing credentials must not fail the call.
    let meeting = match state.meeting_credentials().get().await {
        Ok(meeting) => meeting,
        Err(err) => {
            tracing::warn!(error = %err, "Could not load meeting credentials after registration");
            None
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            student_id: student.student_id,
            student_name: student.student_name,
            meeting,
        }),
    ))
}
