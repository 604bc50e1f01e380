//! Per-day attendance status.

use chrono::NaiveDate;

use crate::models::{
    attendance::AttendanceRecord,
    report::{AttendanceStatus, DailyReport, DailyStatusRow},
    student::Student,
};
use crate::types::StudentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: AttendanceStatus,
    /// Code of the record that decided the status.
    pub submitted_code: Option<String>,
}

/// Latest record of `student_id` among `records`.
///
/// Creation time decides; on equal timestamps the later record in input
/// order wins.
pub fn latest_record<'a>(
    student_id: StudentId,
    records: &'a [AttendanceRecord],
) -> Option<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|record| record.student_id == student_id)
        .fold(None, |latest: Option<&AttendanceRecord>, record| match latest {
            Some(current) if current.created_at > record.created_at => Some(current),
            _ => Some(record),
        })
}

/// Classifies one student for one day.
///
/// `records` are the records of that day; records of other students are
/// ignored.
pub fn classify(
    student_id: StudentId,
    records: &[AttendanceRecord],
    session_code: Option<&str>,
) -> Classification {
    let latest = latest_record(student_id, records);
    let submitted_code = latest.map(|record| record.attendance_code.clone());

    let status = match (session_code, latest) {
        (None, _) => AttendanceStatus::NoCode,
        (Some(_), None) => AttendanceStatus::AbsentNoInform,
        (Some(code), Some(record)) if record.attendance_code == code => AttendanceStatus::Present,
        (Some(_), Some(_)) => AttendanceStatus::AbsentInformed,
    };

    Classification {
        status,
        submitted_code,
    }
}

/// Applies [`classify`] to every student, ascending by identifier.
pub fn build_daily_report(
    date: NaiveDate,
    students: &[Student],
    records: &[AttendanceRecord],
    session_code: Option<&str>,
) -> DailyReport {
    let mut ordered: Vec<&Student> = students.iter().collect();
    ordered.sort_by_key(|student| student.student_id);

    let rows = ordered
        .into_iter()
        .map(|student| {
            let Classification {
                status,
                submitted_code,
            } = classify(student.student_id, records, session_code);
            DailyStatusRow {
                student_id: student.student_id,
                student_name: student.student_name.clone(),
                telegram_username: student.telegram_username.clone(),
                status,
                submitted_code,
            }
        })
        .collect();

    DailyReport {
        date,
        session_code: session_code.map(str::to_string),
        rows,
    }
}
