use crate::api::RegisterStudentRequest;

pub const STUDENT_NAME_MAX_LEN: usize = 100;
pub const TELEGRAM_USERNAME_MAX_LEN: usize = 32;

fn is_valid_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

fn is_valid_handle(handle: &str) -> bool {
    handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Trims both fields and checks them in the order the form shows them.
pub fn validate_registration(
    student_name: &str,
    telegram_username: &str,
) -> Result<RegisterStudentRequest, String> {
    let name = student_name.trim();
    let handle = telegram_username.trim();

    if name.is_empty() {
        return Err("Student Name is required.".into());
    }
    if name.chars().count() > STUDENT_NAME_MAX_LEN {
        return Err(format!(
            "Student Name must be at most {} characters.",
            STUDENT_NAME_MAX_LEN
        ));
    }
    if !is_valid_name(name) {
        return Err("Student Name should only contain letters and spaces.".into());
    }
    if handle.is_empty() {
        return Err("Telegram Username is required.".into());
    }
    if handle.len() > TELEGRAM_USERNAME_MAX_LEN || !is_valid_handle(handle) {
        return Err(
            "Telegram Username should only contain letters, numbers, or underscores without the \"@\" sign."
                .into(),
        );
    }

    Ok(RegisterStudentRequest {
        student_name: name.to_string(),
        telegram_username: handle.to_string(),
    })
}

pub fn card_filename(student_id: &str) -> String {
    format!("StudentCard_{}.svg", student_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_input() {
        let request = validate_registration("  Aung Kyaw ", " aung_k99 ").unwrap();
        assert_eq!(request.student_name, "Aung Kyaw");
        assert_eq!(request.telegram_username, "aung_k99");
    }

    #[test]
    fn rejects_blank_name_first() {
        assert_eq!(
            validate_registration("   ", "").unwrap_err(),
            "Student Name is required."
        );
    }

    #[test]
    fn rejects_digits_in_name() {
        assert_eq!(
            validate_registration("Aung2", "aung").unwrap_err(),
            "Student Name should only contain letters and spaces."
        );
    }

    #[test]
    fn rejects_at_sign_in_handle() {
        let err = validate_registration("Aung", "@aung").unwrap_err();
        assert!(err.contains("without the \"@\" sign"));
    }

    #[test]
    fn requires_handle() {
        assert_eq!(
            validate_registration("Aung", " ").unwrap_err(),
            "Telegram Username is required."
        );
    }

    #[test]
    fn card_filename_uses_student_id() {
        assert_eq!(card_filename("WDF1004"), "StudentCard_WDF1004.svg");
    }
}
