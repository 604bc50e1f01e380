use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{meeting::MeetingCredentials, session_code::SessionCode, student::Student};
use crate::types::StudentId;

/// Attendance outcome of one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// No session code is defined for the day; informational only.
    NoCode,
    /// The student submitted nothing that day.
    AbsentNoInform,
    /// The latest submission matches the session code.
    Present,
    /// The student submitted something, but the latest code does not match.
    AbsentInformed,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::NoCode => "no-code",
            AttendanceStatus::AbsentNoInform => "absent-no-inform",
            AttendanceStatus::Present => "present",
            AttendanceStatus::AbsentInformed => "absent-informed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::NoCode => "No Code",
            AttendanceStatus::AbsentNoInform => "Absent (No Inform)",
            AttendanceStatus::Present => "Present",
            AttendanceStatus::AbsentInformed => "Absent (Informed)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyStatusRow {
    #[schema(value_type = String, example = "WDF1001")]
    pub student_id: StudentId,
    pub student_name: String,
    pub telegram_username: Option<String>,
    pub status: AttendanceStatus,
    /// Code of the authoritative (latest) submission of the day, if any.
    pub submitted_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub session_code: Option<String>,
    pub rows: Vec<DailyStatusRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AbsenteeRow {
    #[schema(value_type = String, example = "WDF1001")]
    pub student_id: StudentId,
    pub student_name: String,
    pub telegram_username: Option<String>,
    /// Consecutive missed class days counted back from the most recent one.
    pub consecutive_misses: u32,
    /// Most recent submission across all dates; `None` means never.
    pub last_attendance: Option<DateTime<Utc>>,
    pub long_term_absent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AbsenteeReport {
    pub as_of: NaiveDate,
    pub threshold: u32,
    pub class_days_considered: usize,
    pub rows: Vec<AbsenteeRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub session_code: Option<String>,
    pub students: Vec<Student>,
    pub session_codes: Vec<SessionCode>,
    pub meeting: Option<MeetingCredentials>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_kebab_case() {
        for status in [
            AttendanceStatus::NoCode,
            AttendanceStatus::AbsentNoInform,
            AttendanceStatus::Present,
            AttendanceStatus::AbsentInformed,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }
}
