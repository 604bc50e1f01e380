use chrono::{DateTime, NaiveDate, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicConfig {
    pub time_zone: String,
    pub absence_threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub telegram_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStudentIdResponse {
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    pub student_name: String,
    pub telegram_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingCredentials {
    pub meeting_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub meeting: Option<MeetingCredentials>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAttendanceRequest {
    pub student_id: String,
    pub attendance_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub attendance_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSessionResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCode {
    pub date: NaiveDate,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertSessionCodeResponse {
    pub session_code: SessionCode,
    pub created: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMeetingCredentialsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    #[serde(default)]
    pub session_code: Option<String>,
    pub students: Vec<Student>,
    pub session_codes: Vec<SessionCode>,
    #[serde(default)]
    pub meeting: Option<MeetingCredentials>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    NoCode,
    AbsentNoInform,
    Present,
    AbsentInformed,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::NoCode => "No Code",
            AttendanceStatus::AbsentNoInform => "Absent (No Inform)",
            AttendanceStatus::Present => "Present",
            AttendanceStatus::AbsentInformed => "Absent (Informed)",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            AttendanceStatus::NoCode => "bg-gray-100 text-gray-700",
            AttendanceStatus::AbsentNoInform => "bg-red-100 text-red-700",
            AttendanceStatus::Present => "bg-green-100 text-green-700",
            AttendanceStatus::AbsentInformed => "bg-yellow-100 text-yellow-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatusRow {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub telegram_username: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub submitted_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    #[serde(default)]
    pub session_code: Option<String>,
    pub rows: Vec<DailyStatusRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenteeRow {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub telegram_username: Option<String>,
    pub consecutive_misses: u32,
    #[serde(default)]
    pub last_attendance: Option<DateTime<Utc>>,
    pub long_term_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenteeReport {
    pub as_of: NaiveDate,
    pub threshold: u32,
    pub class_days_considered: usize,
    pub rows: Vec<AbsenteeRow>,
}

/// Error body returned by every backend route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}
