use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Meeting id/password pair shared with every registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeetingCredentials {
    pub meeting_id: String,
    pub password: String,
}

/// Partial update: an empty or missing field keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMeetingCredentialsRequest {
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateMeetingCredentialsRequest {
    /// Merges the request over the stored credentials. The meeting id is
    /// trimmed; a password is stored exactly as typed unless it is blank.
    pub fn merge_over(&self, current: Option<&MeetingCredentials>) -> (String, String) {
        fn pick(new: Option<&str>, old: Option<&String>) -> String {
            new.filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .or_else(|| old.cloned())
                .unwrap_or_default()
        }

        (
            pick(
                self.meeting_id.as_deref().map(str::trim),
                current.map(|c| &c.meeting_id),
            ),
            pick(self.password.as_deref(), current.map(|c| &c.password)),
        )
    }
}
