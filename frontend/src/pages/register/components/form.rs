use crate::{
    api::{ApiError, NextStudentIdResponse},
    components::error::InlineErrorMessage,
    pages::register::utils::{STUDENT_NAME_MAX_LEN, TELEGRAM_USERNAME_MAX_LEN},
};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-orange-500 bg-white text-gray-800 placeholder-gray-400";

#[component]
pub fn RegisterForm(
    student_name: RwSignal<String>,
    telegram_username: RwSignal<String>,
    next_id: Signal<Option<Result<NextStudentIdResponse, ApiError>>>,
    error: Signal<Option<ApiError>>,
    pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    let preview = move || match next_id.get() {
        None => view! { <p class="text-sm text-gray-500">"Generating your Student ID..."</p> }.into_view(),
        Some(Ok(next)) => view! {
            <p class="text-sm text-gray-600">
                "Your Student ID will be "<strong class="text-gray-900">{next.student_id}</strong>
            </p>
        }
        .into_view(),
        Some(Err(err)) => view! { <p class="text-sm text-red-700">{err.error}</p> }.into_view(),
    };
    let blocked = move || matches!(next_id.get(), Some(Err(_)));

    view! {
        <div class="bg-white rounded-3xl shadow-2xl max-w-md w-full mx-auto p-8 border border-gray-100">
            <div class="text-center mb-6">
                <h2 class="text-3xl font-bold mb-2 text-gray-800 tracking-tight">"Student Registration"</h2>
                {preview}
            </div>
            <InlineErrorMessage error=error />
            <form class="space-y-5" on:submit=move |ev| on_submit.call(ev)>
                <div>
                    <label for="studentName" class="block text-sm font-medium text-gray-600 mb-2">"Student Name"</label>
                    <input
                        id="studentName"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="Full name"
                        maxlength=STUDENT_NAME_MAX_LEN
                        prop:value=move || student_name.get()
                        on:input=move |ev| student_name.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="telegramUsername" class="block text-sm font-medium text-gray-600 mb-2">"Telegram Username"</label>
                    <input
                        id="telegramUsername"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="username"
                        maxlength=TELEGRAM_USERNAME_MAX_LEN
                        prop:value=move || telegram_username.get()
                        on:input=move |ev| telegram_username.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="w-full bg-orange-600 text-white py-3 rounded-lg hover:bg-orange-700 font-semibold disabled:opacity-50"
                    disabled=move || pending.get() || blocked()
                >
                    {move || if pending.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
        </div>
    }
}
