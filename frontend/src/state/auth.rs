use crate::{
    api::{AdminLoginRequest, ApiClient, ApiError},
    pages::admin::repository::AdminRepository,
    utils::storage,
};
use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const SESSION_STORAGE_KEY: &str = "rollcall_admin_session";

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Signed-in administrator as kept in `sessionStorage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub session: Option<AdminSession>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }
}

pub fn load_stored_session() -> Option<AdminSession> {
    let raw = storage::read_session_item(SESSION_STORAGE_KEY)?;
    match serde_json::from_str::<AdminSession>(&raw) {
        Ok(session) if !session.is_expired(Utc::now()) => Some(session),
        _ => {
            storage::remove_session_item(SESSION_STORAGE_KEY);
            None
        }
    }
}

fn store_session(session: &AdminSession) {
    let result = serde_json::to_string(session)
        .map_err(|e| e.to_string())
        .and_then(|raw| storage::write_session_item(SESSION_STORAGE_KEY, &raw));
    if let Err(err) = result {
        log::warn!("Admin session not persisted: {}", err);
    }
}

fn clear_session(set_auth_state: WriteSignal<AuthState>) {
    storage::remove_session_item(SESSION_STORAGE_KEY);
    set_auth_state.update(|state| {
        state.session = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}

fn create_auth_context() -> AuthContext {
    let stored = load_stored_session();
    let (auth_state, set_auth_state) = create_signal(AuthState {
        is_authenticated: stored.is_some(),
        loading: stored.is_some(),
        session: stored.clone(),
    });

    if let Some(session) = stored {
        let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        spawn_local(async move {
            match api_client.admin_session(&session.token).await {
                Ok(_) => set_auth_state.update(|state| state.loading = false),
                Err(err) => {
                    log::info!("Stored admin session rejected: {}", err);
                    clear_session(set_auth_state);
                }
            }
        });
    }

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: AdminLoginRequest,
    repo: &AdminRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match repo.login(request).await {
        Ok(response) => {
            let session = AdminSession {
                token: response.access_token,
                username: response.username,
                expires_at: response.expires_at,
            };
            store_session(&session);
            set_auth_state.update(|state| {
                state.session = Some(session);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Revokes the token server-side; the local session is dropped either way.
pub async fn logout(
    token: Option<String>,
    repo: &AdminRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = match token {
        Some(token) => repo.logout(&token).await,
        None => Ok(()),
    };
    clear_session(set_auth_state);
    result
}

/// Drops a session the backend no longer accepts.
pub fn expire_session(set_auth_state: WriteSignal<AuthState>) {
    clear_session(set_auth_state);
}

fn admin_repository() -> AdminRepository {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    AdminRepository::new_with_client(Rc::new(api))
}

pub fn use_login_action() -> Action<AdminLoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = admin_repository();

    create_action(move |request: &AdminLoginRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (auth, set_auth) = use_auth();
    let repo = admin_repository();

    create_action(move |_: &()| {
        let token = auth.get_untracked().token();
        let repo = repo.clone();
        async move { logout(token, &repo, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.token().is_none());
        });
    }

    #[test]
    fn session_expiry_is_inclusive() {
        let now = Utc::now();
        let session = AdminSession {
            token: "t".into(),
            username: "moderator".into(),
            expires_at: now,
        };
        assert!(session.is_expired(now));
        assert!(!session.is_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn stored_session_round_trips_through_json() {
        let session = AdminSession {
            token: "abc".into(),
            username: "moderator".into(),
            expires_at: Utc::now(),
        };
        let raw = serde_json::to_string(&session).unwrap();
        let parsed: AdminSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, session);
    }
}
