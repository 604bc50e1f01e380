use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppError,
    models::attendance::{AttendanceRecord, SubmitAttendanceRequest},
    services::attendance::submit_attendance,
    state::AppState,
    types::StudentId,
};

pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    payload.validate()?;
    let student_id: StudentId = payload
        .student_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid Student ID".into()))?;

    let record = submit_attendance(
        &state.students(),
        &state.attendance(),
        student_id,
        &payload.attendance_code,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
