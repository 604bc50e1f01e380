use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::dashboard::DateQuery;
use crate::{
    error::AppError,
    models::report::{AbsenteeReport, DailyReport},
    services::{
        absence::AbsenceOptions,
        reports::{daily_report_csv, ReportSources},
    },
    state::AppState,
    utils::time::{parse_date_or_today, today_local},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AbsenteeQuery {
    /// List every student with their count, not only long-term absentees.
    #[serde(default)]
    pub include_all: bool,
}

async fn load_daily(state: &AppState, raw_date: Option<&str>) -> Result<DailyReport, AppError> {
    let tz = state.config.time_zone;
    let date = parse_date_or_today(raw_date, &tz).map_err(AppError::BadRequest)?;
    let students = state.students();
    let attendance = state.attendance();
    let session_codes = state.session_codes();
    let sources = ReportSources {
        students: &students,
        attendance: &attendance,
        session_codes: &session_codes,
    };
    Ok(sources.daily(date, &tz).await?)
}

pub async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyReport>, AppError> {
    Ok(Json(load_daily(&state, query.date.as_deref()).await?))
}

pub async fn export_daily_report(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, AppError> {
    let report = load_daily(&state, query.date.as_deref()).await?;
    let csv = daily_report_csv(&report)?;
    let disposition = format!(
        "attachment; filename=\"attendance-{}.csv\"",
        report.date.format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

pub async fn absentee_report(
    State(state): State<AppState>,
    Query(query): Query<AbsenteeQuery>,
) -> Result<Json<AbsenteeReport>, AppError> {
    let tz = state.config.time_zone;
    let options = AbsenceOptions {
        as_of: today_local(&tz),
        threshold: state.config.absence_threshold,
        include_all: query.include_all,
    };
    let students = state.students();
    let attendance = state.attendance();
    let session_codes = state.session_codes();
    let sources = ReportSources {
        students: &students,
        attendance: &attendance,
        session_codes: &session_codes,
    };
    Ok(Json(sources.absentees(&tz, options).await?))
}
