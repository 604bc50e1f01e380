use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::types::StudentId;
use crate::validation::rules;

/// An append-only attendance submission.
///
/// `student_name` is a snapshot taken when the record is written. Renaming a
/// student later does not touch existing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub id: String,
    #[schema(value_type = String, example = "WDF1001")]
    pub student_id: StudentId,
    pub student_name: String,
    pub attendance_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload for submitting attendance.
pub struct SubmitAttendanceRequest {
    #[validate(custom(function = "rules::validate_student_id"))]
    pub student_id: String,
    #[validate(custom(function = "rules::validate_attendance_code"))]
    pub attendance_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_rejects_malformed_fields() {
        let payload = SubmitAttendanceRequest {
            student_id: "WDF999".into(),
            attendance_code: "abc".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);

        let payload = SubmitAttendanceRequest {
            student_id: "WDF1001".into(),
            attendance_code: "13HH".into(),
        };
        assert!(payload.validate().is_ok());
    }
}
