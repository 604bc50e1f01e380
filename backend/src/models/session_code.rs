use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::rules;

/// The code that proves attendance on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionCode {
    pub date: NaiveDate,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertSessionCodeRequest {
    #[validate(custom(function = "rules::validate_attendance_code"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertSessionCodeResponse {
    pub session_code: SessionCode,
    /// `true` when the date had no code before this call.
    pub created: bool,
}
