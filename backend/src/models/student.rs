use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::meeting::MeetingCredentials;
use crate::types::StudentId;
use crate::validation::rules;

/// A registered student. Records are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    #[schema(value_type = String, example = "WDF1001")]
    pub student_id: StudentId,
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload for registering a new student.
pub struct RegisterStudentRequest {
    #[validate(custom(function = "rules::validate_student_name"))]
    pub student_name: String,
    /// Messaging handle without the leading `@`.
    #[validate(custom(function = "rules::validate_telegram_username"))]
    pub telegram_username: String,
}

impl RegisterStudentRequest {
    pub fn normalized(&self) -> (String, String) {
        (
            self.student_name.trim().to_string(),
            self.telegram_username.trim().to_string(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    #[schema(value_type = String, example = "WDF1001")]
    pub student_id: StudentId,
    pub student_name: String,
    /// Shared meeting credentials, absent when the administrator has not set them yet.
    pub meeting: Option<MeetingCredentials>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NextStudentIdResponse {
    #[schema(value_type = String, example = "WDF1002")]
    pub student_id: StudentId,
}
