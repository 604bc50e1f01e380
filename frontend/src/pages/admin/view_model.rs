use super::{
    repository::AdminRepository,
    utils::{
        build_meeting_update, export_filename, validate_credentials, validate_session_code,
        AdminTab, LoginFormState, MeetingFormState, SessionCodeFormState,
    },
};
use crate::api::{
    AbsenteeReport, AdminLoginRequest, ApiClient, ApiError, DailyReport, DashboardResponse,
    MeetingCredentials, PublicConfig, UpdateMeetingCredentialsRequest, UpsertSessionCodeResponse,
};
use crate::state::auth::{self, use_auth};
use crate::utils::download::trigger_csv_download;
use leptos::*;
use std::rc::Rc;

const DEFAULT_TIME_ZONE: &str = "UTC";
const DEFAULT_ABSENCE_THRESHOLD: u32 = 5;

fn missing_session() -> ApiError {
    ApiError {
        error: "Please log in again.".into(),
        code: "UNAUTHORIZED".into(),
        details: None,
    }
}

fn selected_date_param(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Copy)]
pub struct AdminLoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<AdminLoginRequest, Result<(), ApiError>>,
}

pub fn use_admin_login_view_model() -> AdminLoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    form.password.set(String::new());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    AdminLoginViewModel {
        form,
        error,
        login_action,
    }
}

impl AdminLoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let username = self.form.username.get_untracked();
        let password = self.form.password.get_untracked();
        if let Err(msg) = validate_credentials(&username, &password) {
            self.error.set(Some(ApiError::validation(msg)));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(AdminLoginRequest {
            username: username.trim().to_string(),
            password,
        });
    }
}

type DashboardKey = (Option<String>, Option<String>, u32);
type AbsenteeKey = (Option<String>, bool, u32);

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub public_config: Resource<(), Result<PublicConfig, ApiError>>,
    pub reload: RwSignal<u32>,
    pub session_code_form: SessionCodeFormState,
    pub dashboard: Resource<DashboardKey, Result<DashboardResponse, ApiError>>,
    pub daily_report: Resource<DashboardKey, Result<DailyReport, ApiError>>,
    pub include_all: RwSignal<bool>,
    pub absentees: Resource<AbsenteeKey, Result<AbsenteeReport, ApiError>>,
    pub active_tab: RwSignal<AdminTab>,
    pub code_action: Action<(String, String), Result<UpsertSessionCodeResponse, ApiError>>,
    pub code_error: RwSignal<Option<ApiError>>,
    pub code_message: RwSignal<Option<String>>,
    pub meeting_form: MeetingFormState,
    pub meeting_action:
        Action<UpdateMeetingCredentialsRequest, Result<MeetingCredentials, ApiError>>,
    pub meeting_error: RwSignal<Option<ApiError>>,
    pub meeting_message: RwSignal<Option<String>>,
    pub export_action: Action<String, Result<(), ApiError>>,
    pub export_error: RwSignal<Option<ApiError>>,
}

pub fn use_admin_view_model() -> AdminViewModel {
    let (auth_state, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = AdminRepository::new_with_client(Rc::new(api.clone()));
    let token = create_memo(move |_| auth_state.get().token());

    let reload = create_rw_signal(0u32);
    let session_code_form = SessionCodeFormState::default();
    let include_all = create_rw_signal(false);
    let active_tab = create_rw_signal(AdminTab::default());

    let public_config = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.get_public_config().await }
        },
    );

    let repo_dashboard = repo.clone();
    let dashboard = create_resource(
        move || {
            (
                token.get(),
                selected_date_param(session_code_form.date.get()),
                reload.get(),
            )
        },
        move |(token, date, _)| {
            let repo = repo_dashboard.clone();
            async move {
                let token = token.ok_or_else(missing_session)?;
                repo.dashboard(&token, date).await
            }
        },
    );

    let repo_daily = repo.clone();
    let daily_report = create_resource(
        move || {
            (
                token.get(),
                selected_date_param(session_code_form.date.get()),
                reload.get(),
            )
        },
        move |(token, date, _)| {
            let repo = repo_daily.clone();
            async move {
                let token = token.ok_or_else(missing_session)?;
                repo.daily_report(&token, date).await
            }
        },
    );

    let repo_absentees = repo.clone();
    let absentees = create_resource(
        move || (token.get(), include_all.get(), reload.get()),
        move |(token, include_all, _)| {
            let repo = repo_absentees.clone();
            async move {
                let token = token.ok_or_else(missing_session)?;
                repo.absentees(&token, include_all).await
            }
        },
    );

    // Adopt the backend's "today" once the first dashboard arrives.
    create_effect(move |_| {
        if let Some(Ok(data)) = dashboard.get() {
            if session_code_form.date.get_untracked().is_empty() {
                session_code_form
                    .date
                    .set(data.date.format("%Y-%m-%d").to_string());
            }
        }
    });

    // A revoked or expired token sends the operator back to the login form.
    create_effect(move |_| {
        let rejected = [
            dashboard.get().and_then(|r| r.err()),
            daily_report.get().and_then(|r| r.err()),
            absentees.get().and_then(|r| r.err()),
        ]
        .into_iter()
        .flatten()
        .any(|err| err.is_unauthorized());
        if rejected && token.get_untracked().is_some() {
            auth::expire_session(set_auth);
        }
    });

    let code_error = create_rw_signal(None::<ApiError>);
    let code_message = create_rw_signal(None::<String>);
    let repo_code = repo.clone();
    let code_action = create_action(move |(date, code): &(String, String)| {
        let repo = repo_code.clone();
        let date = date.clone();
        let code = code.clone();
        let token = token.get_untracked();
        async move {
            let token = token.ok_or_else(missing_session)?;
            repo.save_session_code(&token, &date, &code).await
        }
    });
    create_effect(move |_| {
        if let Some(result) = code_action.value().get() {
            match result {
                Ok(saved) => {
                    code_error.set(None);
                    code_message.set(Some(format!(
                        "Code {} saved for {}.",
                        saved.session_code.code,
                        saved.session_code.date.format("%Y-%m-%d")
                    )));
                    session_code_form.code.set(String::new());
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    code_message.set(None);
                    code_error.set(Some(err));
                }
            }
        }
    });

    let meeting_form = MeetingFormState::default();
    let meeting_error = create_rw_signal(None::<ApiError>);
    let meeting_message = create_rw_signal(None::<String>);
    let repo_meeting = repo.clone();
    let meeting_action = create_action(move |request: &UpdateMeetingCredentialsRequest| {
        let repo = repo_meeting.clone();
        let request = request.clone();
        let token = token.get_untracked();
        async move {
            let token = token.ok_or_else(missing_session)?;
            repo.save_meeting_credentials(&token, request).await
        }
    });
    create_effect(move |_| {
        if let Some(result) = meeting_action.value().get() {
            match result {
                Ok(_) => {
                    meeting_error.set(None);
                    meeting_message.set(Some("Meeting details saved successfully!".into()));
                    meeting_form.reset();
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    meeting_message.set(None);
                    meeting_error.set(Some(err));
                }
            }
        }
    });

    let export_error = create_rw_signal(None::<ApiError>);
    let export_action = create_action(move |date: &String| {
        let repo = repo.clone();
        let date = date.clone();
        let token = token.get_untracked();
        async move {
            let token = token.ok_or_else(missing_session)?;
            let csv = repo.export_daily_report(&token, &date).await?;
            trigger_csv_download(&export_filename(&date), &csv).map_err(ApiError::unknown)
        }
    });
    create_effect(move |_| {
        if let Some(result) = export_action.value().get() {
            export_error.set(result.err());
        }
    });

    AdminViewModel {
        public_config,
        reload,
        session_code_form,
        dashboard,
        daily_report,
        include_all,
        absentees,
        active_tab,
        code_action,
        code_error,
        code_message,
        meeting_form,
        meeting_action,
        meeting_error,
        meeting_message,
        export_action,
        export_error,
    }
}

impl AdminViewModel {
    pub fn time_zone(&self) -> String {
        self.public_config
            .get()
            .and_then(|r| r.ok())
            .map(|c| c.time_zone)
            .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string())
    }

    pub fn absence_threshold(&self) -> u32 {
        self.public_config
            .get()
            .and_then(|r| r.ok())
            .map(|c| c.absence_threshold)
            .unwrap_or(DEFAULT_ABSENCE_THRESHOLD)
    }

    pub fn current_meeting(&self) -> Option<MeetingCredentials> {
        self.dashboard
            .get()
            .and_then(|r| r.ok())
            .and_then(|d| d.meeting)
    }

    pub fn save_session_code(&self) {
        if self.code_action.pending().get_untracked() {
            return;
        }
        self.code_message.set(None);
        match validate_session_code(
            &self.session_code_form.date.get_untracked(),
            &self.session_code_form.code.get_untracked(),
        ) {
            Ok(payload) => {
                self.code_error.set(None);
                self.code_action.dispatch(payload);
            }
            Err(msg) => self.code_error.set(Some(ApiError::validation(msg))),
        }
    }

    pub fn save_meeting(&self) {
        if self.meeting_action.pending().get_untracked() {
            return;
        }
        self.meeting_message.set(None);
        let current = untrack(|| self.dashboard.get()).and_then(|r| r.ok()).and_then(|d| d.meeting);
        match build_meeting_update(
            &self.meeting_form.meeting_id.get_untracked(),
            &self.meeting_form.password.get_untracked(),
            current.as_ref(),
        ) {
            Ok(request) => {
                self.meeting_error.set(None);
                self.meeting_action.dispatch(request);
            }
            Err(msg) => self.meeting_error.set(Some(ApiError::validation(msg))),
        }
    }

    pub fn export_csv(&self) {
        if self.export_action.pending().get_untracked() {
            return;
        }
        let date = self.session_code_form.date.get_untracked();
        if date.trim().is_empty() {
            self.export_error
                .set(Some(ApiError::validation("Select a date to export.")));
            return;
        }
        self.export_error.set(None);
        self.export_action.dispatch(date);
    }

    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::provide_admin_session, ssr::with_runtime};

    fn with_admin_vm(test: impl FnOnce(AdminViewModel)) {
        with_runtime(|| {
            leptos_reactive::suppress_resource_load(true);
            provide_admin_session();
            test(use_admin_view_model());
            leptos_reactive::suppress_resource_load(false);
        });
    }

    #[test]
    fn login_requires_both_fields() {
        with_runtime(|| {
            let vm = use_admin_login_view_model();
            vm.form.username.set("moderator".into());
            vm.submit();
            assert_eq!(
                vm.error.get().map(|e| e.error),
                Some("Password is required.".to_string())
            );
            assert_eq!(vm.login_action.version().get(), 0);
        });
    }

    #[test]
    fn session_code_needs_a_date() {
        with_admin_vm(|vm| {
            vm.session_code_form.set_code("abc1");
            vm.save_session_code();
            assert_eq!(vm.session_code_form.code.get(), "ABC1");
            assert_eq!(
                vm.code_error.get().map(|e| e.error),
                Some("Date must be in YYYY-MM-DD format".to_string())
            );
            assert_eq!(vm.code_action.version().get(), 0);
        });
    }

    #[test]
    fn meeting_without_changes_is_refused() {
        with_admin_vm(|vm| {
            vm.save_meeting();
            assert_eq!(
                vm.meeting_error.get().map(|e| e.error),
                Some("No changes detected. Enter new values to update.".to_string())
            );
        });
    }

    #[test]
    fn export_needs_a_date() {
        with_admin_vm(|vm| {
            vm.export_csv();
            assert!(vm.export_error.get().is_some());
            assert_eq!(vm.export_action.version().get(), 0);
        });
    }

    #[test]
    fn defaults_apply_before_config_loads() {
        with_admin_vm(|vm| {
            assert_eq!(vm.time_zone(), "UTC");
            assert_eq!(vm.absence_threshold(), 5);
            assert!(vm.current_meeting().is_none());
            assert_eq!(vm.active_tab.get(), AdminTab::DailyStatus);
        });
    }
}
