use thiserror::Error;

use crate::db::StoreError;
use crate::models::attendance::AttendanceRecord;
use crate::repositories::{AttendanceRepository, StudentRepository};
use crate::types::StudentId;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Student ID not found. Please register first.")]
    NotRegistered,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Appends an attendance record for a registered student.
///
/// The code is stored as submitted; whether it matches the day's session
/// code is decided when reports are built.
pub async fn submit_attendance(
    students: &StudentRepository,
    attendance: &AttendanceRepository,
    student_id: StudentId,
    attendance_code: &str,
) -> Result<AttendanceRecord, SubmissionError> {
    let student = students
        .find_by_id(student_id)
        .await?
        .ok_or(SubmissionError::NotRegistered)?;

    let record = attendance.create(&student, attendance_code).await?;
    tracing::info!(%student_id, record_id = %record.id, "Attendance submitted");
    Ok(record)
}
