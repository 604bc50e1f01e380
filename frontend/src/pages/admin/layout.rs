use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn AdminDashboardFrame(children: Children) -> impl IntoView {
    let (auth, _) = use_auth();
    let username = move || {
        auth.get()
            .session
            .map(|s| format!("Signed in as {}", s.username))
            .unwrap_or_default()
    };
    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-gray-900">"Admin Attendance Dashboard"</h1>
                <p class="mt-1 text-sm text-gray-600">{username}</p>
            </div>
            {children()}
        </div>
    }
}

/// Shows `children` to a signed-in operator and `login` to everyone else.
#[component]
pub fn AdminDashboardScaffold(
    signed_in: Signal<bool>,
    #[prop(into)] login: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || signed_in.get() fallback=login>
            {
                let children = children.clone();
                view! { <AdminDashboardFrame>{children()}</AdminDashboardFrame> }
            }
        </Show>
    }
}
