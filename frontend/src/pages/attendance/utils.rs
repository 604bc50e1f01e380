use crate::api::SubmitAttendanceRequest;
use leptos::*;

pub const STUDENT_ID_MAX_LEN: usize = 7;
pub const ATTENDANCE_CODE_MAX_LEN: usize = 10;

/// Upper-cases, drops anything but ASCII letters and digits, and truncates.
pub fn sanitize_input(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(max_len)
        .collect()
}

fn is_student_id(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && value.starts_with("WDF1") && bytes[4..].iter().all(u8::is_ascii_digit)
}

fn is_attendance_code(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= ATTENDANCE_CODE_MAX_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn validate_submission(
    student_id: &str,
    attendance_code: &str,
) -> Result<SubmitAttendanceRequest, String> {
    if student_id.is_empty() {
        return Err("Student ID is required.".into());
    }
    if !is_student_id(student_id) {
        return Err("Student ID must be in format WDF1XXX (e.g., WDF1000 to WDF1999).".into());
    }
    if !is_attendance_code(attendance_code) {
        return Err(
            "Attendance Code must consist of uppercase letters and numbers only.".into(),
        );
    }
    Ok(SubmitAttendanceRequest {
        student_id: student_id.to_string(),
        attendance_code: attendance_code.to_string(),
    })
}

#[derive(Clone, Copy)]
pub struct AttendanceFormState {
    pub student_id: RwSignal<String>,
    pub attendance_code: RwSignal<String>,
}

impl Default for AttendanceFormState {
    fn default() -> Self {
        Self {
            student_id: create_rw_signal(String::new()),
            attendance_code: create_rw_signal(String::new()),
        }
    }
}

impl AttendanceFormState {
    pub fn set_student_id(&self, raw: &str) {
        self.student_id.set(sanitize_input(raw, STUDENT_ID_MAX_LEN));
    }

    pub fn set_attendance_code(&self, raw: &str) {
        self.attendance_code
            .set(sanitize_input(raw, ATTENDANCE_CODE_MAX_LEN));
    }

    pub fn to_request(&self) -> Result<SubmitAttendanceRequest, String> {
        validate_submission(
            &self.student_id.get_untracked(),
            &self.attendance_code.get_untracked(),
        )
    }

    pub fn reset(&self) {
        self.student_id.set(String::new());
        self.attendance_code.set(String::new());
    }
}
