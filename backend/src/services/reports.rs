//! Report assembly: loads what each report needs, then hands the data to the
//! pure classifiers.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::db::StoreError;
use crate::models::report::{AbsenteeReport, DailyReport};
use crate::repositories::{AttendanceRepository, SessionCodeRepository, StudentRepository};
use crate::services::{
    absence::{detect_absentees, AbsenceOptions},
    attendance_status::build_daily_report,
};
use crate::utils::csv::render_csv;

const DAILY_CSV_HEADER: [&str; 6] = [
    "Date",
    "Student ID",
    "Student Name",
    "Telegram Username",
    "Status",
    "Submitted Code",
];

pub struct ReportSources<'a> {
    pub students: &'a StudentRepository,
    pub attendance: &'a AttendanceRepository,
    pub session_codes: &'a SessionCodeRepository,
}

impl ReportSources<'_> {
    pub async fn daily(&self, date: NaiveDate, tz: &Tz) -> Result<DailyReport, StoreError> {
        let (students, records, stored_code) = tokio::try_join!(
            self.students.list_all(),
            self.attendance.list_for_date(date, tz),
            self.session_codes.find_by_date(date),
        )?;
        let code = stored_code.map(|stored| stored.session_code.code);
        tracing::debug!(
            %date,
            students = students.len(),
            records = records.len(),
            has_code = code.is_some(),
            "Building daily report"
        );
        Ok(build_daily_report(date, &students, &records, code.as_deref()))
    }

    pub async fn absentees(
        &self,
        tz: &Tz,
        options: AbsenceOptions,
    ) -> Result<AbsenteeReport, StoreError> {
        let (students, session_codes, records) = tokio::try_join!(
            self.students.list_all(),
            self.session_codes.list_all(),
            self.attendance.list_all(),
        )?;
        tracing::debug!(
            as_of = %options.as_of,
            students = students.len(),
            class_days = session_codes.len(),
            records = records.len(),
            "Building absentee report"
        );
        Ok(detect_absentees(
            &students,
            &session_codes,
            &records,
            tz,
            options,
        ))
    }
}

pub fn daily_report_csv(report: &DailyReport) -> anyhow::Result<String> {
    let date = report.date.format("%Y-%m-%d").to_string();
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            vec![
                date.clone(),
                row.student_id.to_string(),
                row.student_name.clone(),
                row.telegram_username.clone().unwrap_or_default(),
                row.status.label().to_string(),
                row.submitted_code.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_csv(&DAILY_CSV_HEADER, &rows)
}
