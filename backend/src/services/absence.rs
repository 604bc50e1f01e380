//! Long-term absence detection.
//!
//! A class day is a date with a session code. For each student the detector
//! walks class days from the most recent one (on or before `as_of`) backwards
//! and counts the days on which the student has no record carrying exactly
//! that day's code. Counting stops at the first attended day.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};

use crate::models::{
    attendance::AttendanceRecord,
    report::{AbsenteeReport, AbsenteeRow},
    session_code::SessionCode,
    student::Student,
};
use crate::types::StudentId;
use crate::utils::time::local_date;

pub const DEFAULT_ABSENCE_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub struct AbsenceOptions {
    pub as_of: NaiveDate,
    pub threshold: u32,
    /// List every student, not only those at or over the threshold.
    pub include_all: bool,
}

/// Codes each student submitted per local calendar day, plus their latest submission.
struct SubmissionIndex<'a> {
    codes: HashMap<(StudentId, NaiveDate), HashSet<&'a str>>,
    last_seen: HashMap<StudentId, DateTime<Utc>>,
}

impl<'a> SubmissionIndex<'a> {
    fn build(records: &'a [AttendanceRecord], tz: &Tz) -> Self {
        let mut codes: HashMap<(StudentId, NaiveDate), HashSet<&'a str>> = HashMap::new();
        let mut last_seen: HashMap<StudentId, DateTime<Utc>> = HashMap::new();

        for record in records {
            codes
                .entry((record.student_id, local_date(&record.created_at, tz)))
                .or_default()
                .insert(record.attendance_code.as_str());
            last_seen
                .entry(record.student_id)
                .and_modify(|seen| {
                    if record.created_at > *seen {
                        *seen = record.created_at;
                    }
                })
                .or_insert(record.created_at);
        }

        Self { codes, last_seen }
    }

    fn attended(&self, student_id: StudentId, class_day: &SessionCode) -> bool {
        self.codes
            .get(&(student_id, class_day.date))
            .map(|codes| codes.contains(class_day.code.as_str()))
            .unwrap_or(false)
    }
}

/// Counts consecutive missed class days. `class_days` must be newest first.
fn consecutive_misses(
    student_id: StudentId,
    class_days: &[&SessionCode],
    index: &SubmissionIndex<'_>,
) -> u32 {
    class_days
        .iter()
        .take_while(|day| !index.attended(student_id, day))
        .count() as u32
}

pub fn detect_absentees(
    students: &[Student],
    session_codes: &[SessionCode],
    records: &[AttendanceRecord],
    tz: &Tz,
    options: AbsenceOptions,
) -> AbsenteeReport {
    let mut class_days: Vec<&SessionCode> = session_codes
        .iter()
        .filter(|day| day.date <= options.as_of)
        .collect();
    // Stable sort, so for a date stored twice the first entry in input order
    // wins; the repository lists the newest document first.
    class_days.sort_by(|a, b| b.date.cmp(&a.date));
    class_days.dedup_by_key(|day| day.date);

    let index = SubmissionIndex::build(records, tz);
    let threshold = options.threshold.max(1);

    let mut ordered: Vec<&Student> = students.iter().collect();
    ordered.sort_by_key(|student| student.student_id);

    let rows = ordered
        .into_iter()
        .filter_map(|student| {
            let misses = consecutive_misses(student.student_id, &class_days, &index);
            let long_term_absent = misses >= threshold;
            if !long_term_absent && !options.include_all {
                return None;
            }
            Some(AbsenteeRow {
                student_id: student.student_id,
                student_name: student.student_name.clone(),
                telegram_username: student.telegram_username.clone(),
                consecutive_misses: misses,
                last_attendance: index.last_seen.get(&student.student_id).copied(),
                long_term_absent,
            })
        })
        .collect();

    AbsenteeReport {
        as_of: options.as_of,
        threshold,
        class_days_considered: class_days.len(),
        rows,
    }
}
