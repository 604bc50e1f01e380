use super::{repository, utils::AttendanceFormState};
use crate::api::{ApiClient, ApiError, AttendanceRecord, SubmitAttendanceRequest};
use leptos::*;

pub const SUCCESS_MESSAGE: &str = "Attendance submitted successfully!";

#[derive(Clone, Copy)]
pub struct AttendanceViewModel {
    pub form: AttendanceFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub success: RwSignal<bool>,
    pub submit_action: Action<SubmitAttendanceRequest, Result<AttendanceRecord, ApiError>>,
}

impl AttendanceViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let form = AttendanceFormState::default();
        let error = create_rw_signal(None::<ApiError>);
        let success = create_rw_signal(false);

        let submit_action = create_action(move |request: &SubmitAttendanceRequest| {
            let api = api.clone();
            let request = request.clone();
            async move { repository::submit_attendance(&api, &request).await }
        });

        create_effect(move |_| {
            if let Some(result) = submit_action.value().get() {
                match result {
                    Ok(_) => {
                        error.set(None);
                        success.set(true);
                        form.reset();
                    }
                    Err(err) => {
                        success.set(false);
                        error.set(Some(err));
                    }
                }
            }
        });

        Self {
            form,
            error,
            success,
            submit_action,
        }
    }

    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        self.success.set(false);
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.submit_action.dispatch(request);
            }
            Err(msg) => self.error.set(Some(ApiError::validation(msg))),
        }
    }
}

impl Default for AttendanceViewModel {
    fn default() -> Self {
        Self::new()
    }
}
