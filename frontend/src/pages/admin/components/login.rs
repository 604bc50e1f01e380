use crate::{components::error::InlineErrorMessage, pages::admin::view_model::AdminLoginViewModel};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-orange-500 text-gray-800";

#[component]
pub fn AdminLoginForm(vm: AdminLoginViewModel) -> impl IntoView {
    let pending = vm.login_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="bg-white rounded-2xl shadow-lg max-w-sm w-full mx-auto p-8">
            <h2 class="text-2xl font-bold mb-6 text-center text-orange-700">"Admin Login"</h2>
            <InlineErrorMessage error=vm.error.into() />
            <form class="space-y-4" on:submit=on_submit>
                <div>
                    <label for="username" class="block text-sm font-medium text-gray-700 mb-1">"Username"</label>
                    <input
                        id="username"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="admin"
                        autocomplete="username"
                        prop:value=move || vm.form.username.get()
                        on:input=move |ev| vm.form.username.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="password" class="block text-sm font-medium text-gray-700 mb-1">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        placeholder="Enter password"
                        autocomplete="current-password"
                        prop:value=move || vm.form.password.get()
                        on:input=move |ev| vm.form.password.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="w-full bg-orange-600 text-white py-3 rounded-lg hover:bg-orange-700 font-semibold disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}
