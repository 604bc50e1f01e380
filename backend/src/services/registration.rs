//! Student registration and identifier allocation.
//!
//! Identifiers are allocated by compare-and-retry: read the highest assigned
//! identifier, write the next one, and start over when the store reports a
//! conflict. There is no transaction around the read and the write.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::student::Student;
use crate::repositories::StudentRepository;
use crate::types::StudentId;

pub const MAX_REGISTRATION_ATTEMPTS: u32 = 5;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Student ID capacity exhausted. Please contact your class teacher or moderator.")]
    CapacityExhausted,
    #[error("Too many concurrent registrations. Please try again.")]
    TooManyAttempts,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identifier following `latest`, or the first identifier when none exists.
pub fn next_student_id(latest: Option<StudentId>) -> Result<StudentId, RegistrationError> {
    match latest {
        None => Ok(StudentId::FIRST),
        Some(last) => last.next().ok_or(RegistrationError::CapacityExhausted),
    }
}

/// Identifier the next registration would receive.
pub async fn preview_next_id(students: &StudentRepository) -> Result<StudentId, RegistrationError> {
    next_student_id(students.find_latest_id().await?)
}

/// Registers a student under the next free identifier.
///
/// `student_name` and `telegram_username` must already be validated and
/// trimmed.
pub async fn register_student(
    students: &StudentRepository,
    student_name: &str,
    telegram_username: &str,
) -> Result<Student, RegistrationError> {
    for attempt in 1..=MAX_REGISTRATION_ATTEMPTS {
        let student_id = preview_next_id(students).await?;
        let candidate = Student {
            student_id,
            student_name: student_name.to_string(),
            telegram_username: Some(telegram_username.to_string())
                .filter(|handle| !handle.is_empty()),
        };

        match students.create(&candidate).await {
            Ok(created) => {
                tracing::info!(student_id = %created.student_id, attempt, "Registered student");
                return Ok(created);
            }
            Err(StoreError::Conflict(message)) => {
                tracing::warn!(
                    %student_id,
                    attempt,
                    error = %message,
                    "Student ID already taken, retrying"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::error!(
        attempts = MAX_REGISTRATION_ATTEMPTS,
        "Giving up on registration after repeated conflicts"
    );
    Err(RegistrationError::TooManyAttempts)
}
