use super::{repository::RegisterRepository, utils};
use crate::api::{ApiClient, ApiError, NextStudentIdResponse, RegisterStudentRequest, RegistrationResponse};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub student_name: RwSignal<String>,
    pub telegram_username: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            student_name: create_rw_signal(String::new()),
            telegram_username: create_rw_signal(String::new()),
        }
    }
}

impl RegisterFormState {
    pub fn reset(&self) {
        self.student_name.set(String::new());
        self.telegram_username.set(String::new());
    }
}

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub next_id_reload: RwSignal<u32>,
    pub next_id: Resource<u32, Result<NextStudentIdResponse, ApiError>>,
    pub error: RwSignal<Option<ApiError>>,
    pub registered: RwSignal<Option<RegistrationResponse>>,
    pub register_action: Action<RegisterStudentRequest, Result<RegistrationResponse, ApiError>>,
}

impl RegisterViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repo = RegisterRepository::new_with_client(Rc::new(api));

        let form = RegisterFormState::default();
        let error = create_rw_signal(None::<ApiError>);
        let registered = create_rw_signal(None::<RegistrationResponse>);
        let next_id_reload = create_rw_signal(0u32);

        let repo_for_preview = repo.clone();
        let next_id = create_resource(
            move || next_id_reload.get(),
            move |_| {
                let repo = repo_for_preview.clone();
                async move { repo.preview_student_id().await }
            },
        );

        let register_action = create_action(move |request: &RegisterStudentRequest| {
            let repo = repo.clone();
            let request = request.clone();
            async move { repo.register(request).await }
        });

        create_effect(move |_| {
            if let Some(result) = register_action.value().get() {
                match result {
                    Ok(response) => {
                        error.set(None);
                        form.reset();
                        registered.set(Some(response));
                    }
                    Err(err) => {
                        error.set(Some(err));
                        // The preview may have moved on if someone else registered.
                        next_id_reload.update(|v| *v += 1);
                    }
                }
            }
        });

        Self {
            form,
            next_id_reload,
            next_id,
            error,
            registered,
            register_action,
        }
    }

    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        match utils::validate_registration(
            &self.form.student_name.get_untracked(),
            &self.form.telegram_username.get_untracked(),
        ) {
            Ok(request) => {
                self.error.set(None);
                self.register_action.dispatch(request);
            }
            Err(msg) => self.error.set(Some(ApiError::validation(msg))),
        }
    }

    /// Returns to an empty form for the next student.
    pub fn register_another(&self) {
        self.registered.set(None);
        self.error.set(None);
        self.next_id_reload.update(|v| *v += 1);
    }
}

impl Default for RegisterViewModel {
    fn default() -> Self {
        Self::new()
    }
}
