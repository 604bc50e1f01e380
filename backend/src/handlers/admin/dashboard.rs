use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    models::{report::DashboardResponse, student::Student},
    state::AppState,
    utils::time::parse_date_or_today,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; defaults to today in the configured time zone.
    pub date: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let date = parse_date_or_today(query.date.as_deref(), &state.config.time_zone)
        .map_err(AppError::BadRequest)?;

    let students_repo = state.students();
    let codes_repo = state.session_codes();
    let meeting_repo = state.meeting_credentials();
    let (students, session_codes, meeting) = tokio::try_join!(
        students_repo.list_all(),
        codes_repo.list_all(),
        meeting_repo.get(),
    )?;

    let session_code = session_codes
        .iter()
        .find(|code| code.date == date)
        .map(|code| code.code.clone());

    Ok(Json(DashboardResponse {
        date,
        session_code,
        students,
        session_codes,
        meeting,
    }))
}

pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students().list_all().await?))
}
