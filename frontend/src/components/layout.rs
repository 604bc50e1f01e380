use crate::{state::auth, utils::storage};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-gray-600 hover:text-gray-900 px-3 py-2 rounded-md text-sm font-medium hover:bg-gray-100";

#[component]
pub fn Header() -> impl IntoView {
    let (auth_state, _set_auth) = auth::use_auth();
    let signed_in = move || auth_state.get().is_authenticated;
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            storage::navigate_to("/admin");
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };

    view! {
        <header class="bg-white shadow-sm border-b border-gray-200">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-gray-900">"Rollcall"</a>
                    <nav class="flex space-x-2">
                        <a href="/register" class=NAV_LINK_CLASS>"Register"</a>
                        <a href="/attendance" class=NAV_LINK_CLASS>"Attendance"</a>
                        <a href="/admin" class=NAV_LINK_CLASS>"Admin"</a>
                        <Show when=signed_in>
                            <button
                                class=format!("{} disabled:opacity-50", NAV_LINK_CLASS)
                                on:click=on_logout
                                disabled=move || logout_pending.get()
                            >
                                "Logout"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gradient-to-br from-slate-50 via-white to-slate-100">
            <Header/>
            <main class="max-w-5xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-orange-600"></div>
        </div>
    }
}
