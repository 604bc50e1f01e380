use crate::{
    api::{MeetingCredentials, UpdateMeetingCredentialsRequest},
    pages::attendance::utils::{sanitize_input, ATTENDANCE_CODE_MAX_LEN},
};
use chrono::NaiveDate;
use leptos::*;

pub const MEETING_PASSWORD_MIN_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    DailyStatus,
    Absentees,
}

impl AdminTab {
    pub fn label(&self, threshold: u32) -> String {
        match self {
            AdminTab::DailyStatus => "Current Attendance Status".to_string(),
            AdminTab::Absentees => format!(
                "Long-term Absent ({}+ class days)",
                threshold
            ),
        }
    }
}

pub fn sanitize_meeting_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn sanitize_session_code(raw: &str) -> String {
    sanitize_input(raw, ATTENDANCE_CODE_MAX_LEN)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be in YYYY-MM-DD format".to_string())
}

pub fn validate_session_code(date: &str, code: &str) -> Result<(String, String), String> {
    let date = parse_date(date)?;
    if code.is_empty() {
        return Err("Attendance Code is required.".into());
    }
    if code.len() > ATTENDANCE_CODE_MAX_LEN
        || !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(
            "Attendance Code must consist of uppercase letters and numbers only.".into(),
        );
    }
    Ok((date.format("%Y-%m-%d").to_string(), code.to_string()))
}

/// Empty fields keep the stored value; an update that changes nothing is refused.
pub fn build_meeting_update(
    meeting_id: &str,
    password: &str,
    current: Option<&MeetingCredentials>,
) -> Result<UpdateMeetingCredentialsRequest, String> {
    let meeting_id = meeting_id.trim();
    let password = if password.trim().is_empty() { "" } else { password };
    if !meeting_id.is_empty() && !meeting_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("Meeting ID must be numbers only.".into());
    }
    if !password.is_empty() && password.chars().count() < MEETING_PASSWORD_MIN_LEN {
        return Err(format!(
            "Meeting password must be at least {} characters.",
            MEETING_PASSWORD_MIN_LEN
        ));
    }

    let id_changed = !meeting_id.is_empty()
        && current.map(|c| c.meeting_id.as_str()) != Some(meeting_id);
    let password_changed =
        !password.is_empty() && current.map(|c| c.password.as_str()) != Some(password);
    if !id_changed && !password_changed {
        return Err("No changes detected. Enter new values to update.".into());
    }

    Ok(UpdateMeetingCredentialsRequest {
        meeting_id: (!meeting_id.is_empty()).then(|| meeting_id.to_string()),
        password: (!password.is_empty()).then(|| password.to_string()),
    })
}

pub fn export_filename(date: &str) -> String {
    format!("attendance-{}.csv", date)
}

#[derive(Clone, Copy)]
pub struct SessionCodeFormState {
    pub date: RwSignal<String>,
    pub code: RwSignal<String>,
}

impl Default for SessionCodeFormState {
    fn default() -> Self {
        Self {
            date: create_rw_signal(String::new()),
            code: create_rw_signal(String::new()),
        }
    }
}

impl SessionCodeFormState {
    pub fn set_code(&self, raw: &str) {
        self.code.set(sanitize_session_code(raw));
    }
}

#[derive(Clone, Copy)]
pub struct MeetingFormState {
    pub meeting_id: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for MeetingFormState {
    fn default() -> Self {
        Self {
            meeting_id: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl MeetingFormState {
    pub fn set_meeting_id(&self, raw: &str) {
        self.meeting_id.set(sanitize_meeting_id(raw));
    }

    pub fn reset(&self) {
        self.meeting_id.set(String::new());
        self.password.set(String::new());
    }
}

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required.".into());
    }
    if password.is_empty() {
        return Err("Password is required.".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> MeetingCredentials {
        MeetingCredentials {
            meeting_id: "81234567".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn meeting_id_keeps_digits_only() {
        assert_eq!(sanitize_meeting_id("812 345-67a"), "81234567");
    }

    #[test]
    fn session_code_requires_valid_date() {
        assert_eq!(
            validate_session_code("03/02/2026", "ABC").unwrap_err(),
            "Date must be in YYYY-MM-DD format"
        );
        let (date, code) = validate_session_code("2026-03-02", "ABC1").unwrap();
        assert_eq!(date, "2026-03-02");
        assert_eq!(code, "ABC1");
    }

    #[test]
    fn session_code_rejects_empty_and_lowercase() {
        assert!(validate_session_code("2026-03-02", "").is_err());
        assert!(validate_session_code("2026-03-02", "abc").is_err());
    }

    #[test]
    fn meeting_update_is_partial() {
        let request = build_meeting_update("", "newpass1", Some(&current())).unwrap();
        assert_eq!(request.meeting_id, None);
        assert_eq!(request.password.as_deref(), Some("newpass1"));
    }

    #[test]
    fn meeting_update_keeps_password_spacing() {
        let request = build_meeting_update("", " abcde ", Some(&current())).unwrap();
        assert_eq!(request.password.as_deref(), Some(" abcde "));

        let request = build_meeting_update("7654321", "   ", Some(&current())).unwrap();
        assert_eq!(request.password, None);
    }

    #[test]
    fn meeting_update_detects_no_changes() {
        assert_eq!(
            build_meeting_update("81234567", "secret1", Some(&current())).unwrap_err(),
            "No changes detected. Enter new values to update."
        );
        assert!(build_meeting_update("", "", None).is_err());
    }

    #[test]
    fn meeting_update_validates_fields() {
        assert_eq!(
            build_meeting_update("12a", "", None).unwrap_err(),
            "Meeting ID must be numbers only."
        );
        assert_eq!(
            build_meeting_update("123", "short", None).unwrap_err(),
            "Meeting password must be at least 6 characters."
        );
    }

    #[test]
    fn first_meeting_setup_sends_both_fields() {
        let request = build_meeting_update("123456", "secret1", None).unwrap();
        assert_eq!(request.meeting_id.as_deref(), Some("123456"));
        assert_eq!(request.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn export_filename_includes_date() {
        assert_eq!(export_filename("2026-03-02"), "attendance-2026-03-02.csv");
    }

    #[test]
    fn tab_labels_mention_threshold() {
        assert_eq!(AdminTab::Absentees.label(5), "Long-term Absent (5+ class days)");
    }

    #[test]
    fn credentials_must_be_filled() {
        assert!(validate_credentials(" ", "x").is_err());
        assert!(validate_credentials("moderator", "").is_err());
        assert!(validate_credentials("moderator", "pw").is_ok());
    }
}
