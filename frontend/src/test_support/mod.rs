#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::state::auth::{AdminSession, AuthState};
    use chrono::{Duration, Utc};
    use leptos::*;

    pub fn admin_session() -> AdminSession {
        AdminSession {
            token: "test-token".into(),
            username: "moderator".into(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn provide_admin_session() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            session: Some(admin_session()),
            is_authenticated: true,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
