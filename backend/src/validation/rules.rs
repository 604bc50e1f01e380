//! Common validation rules shared across request payloads.

use std::borrow::Cow;

use validator::ValidationError;

use crate::types::StudentId;

pub const ATTENDANCE_CODE_MAX_LEN: usize = 10;
pub const STUDENT_NAME_MAX_LEN: usize = 100;
pub const TELEGRAM_USERNAME_MAX_LEN: usize = 32;
pub const MEETING_ID_MAX_LEN: usize = 20;
pub const MEETING_PASSWORD_MIN_LEN: usize = 6;
pub const MEETING_PASSWORD_MAX_LEN: usize = 64;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validates the `WDF1XXX` identifier format.
pub fn validate_student_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("student_id_required", "Student ID is required."));
    }
    value.parse::<StudentId>().map(|_| ()).map_err(|_| {
        error(
            "student_id_invalid_format",
            "Student ID must be in format WDF1XXX (e.g., WDF1000 to WDF1999).",
        )
    })
}

/// Validates an attendance or session code.
///
/// Requirements:
/// - 1-10 characters
/// - Only uppercase ASCII letters and digits
pub fn validate_attendance_code(value: &str) -> Result<(), ValidationError> {
    if value.is_empty()
        || value.len() > ATTENDANCE_CODE_MAX_LEN
        || !value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return Err(error(
            "attendance_code_invalid",
            "Code must consist of 1-10 uppercase letters and numbers only.",
        ));
    }
    Ok(())
}

/// Validates a student display name: letters and spaces only.
pub fn validate_student_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error("student_name_required", "Student Name is required."));
    }
    if trimmed.chars().count() > STUDENT_NAME_MAX_LEN {
        return Err(error(
            "student_name_too_long",
            "Student Name must be at most 100 characters.",
        ));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(error(
            "student_name_invalid_characters",
            "Student Name should only contain letters and spaces.",
        ));
    }
    Ok(())
}

/// Validates a messaging handle (without the leading `@`).
pub fn validate_telegram_username(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error(
            "telegram_username_required",
            "Telegram Username is required.",
        ));
    }
    if trimmed.len() > TELEGRAM_USERNAME_MAX_LEN
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(error(
            "telegram_username_invalid",
            "Telegram Username should only contain letters, numbers, or underscores without the \"@\" sign.",
        ));
    }
    Ok(())
}

pub fn validate_meeting_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty()
        || value.len() > MEETING_ID_MAX_LEN
        || !value.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(error("meeting_id_invalid", "Meeting ID must be numbers only."));
    }
    Ok(())
}

pub fn validate_meeting_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < MEETING_PASSWORD_MIN_LEN {
        return Err(error(
            "meeting_password_too_short",
            "Meeting password must be at least 6 characters.",
        ));
    }
    if len > MEETING_PASSWORD_MAX_LEN {
        return Err(error(
            "meeting_password_too_long",
            "Meeting password must be at most 64 characters.",
        ));
    }
    Ok(())
}
