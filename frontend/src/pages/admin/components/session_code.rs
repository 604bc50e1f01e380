use crate::{
    components::error::{InlineErrorMessage, SuccessMessage},
    pages::{admin::view_model::AdminViewModel, attendance::utils::ATTENDANCE_CODE_MAX_LEN},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn SessionCodeSection(vm: AdminViewModel) -> impl IntoView {
    let pending = vm.code_action.pending();
    let form = vm.session_code_form;
    let defined_code = move || {
        vm.dashboard
            .get()
            .and_then(|r| r.ok())
            .and_then(|d| d.session_code)
    };
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_session_code();
    };
    let recent_codes = move || {
        vm.dashboard
            .get()
            .and_then(|r| r.ok())
            .map(|d| d.session_codes.into_iter().take(5).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    view! {
        <section class="bg-white shadow rounded-lg p-6 space-y-4">
            <h3 class="text-lg font-semibold text-orange-700">"Date-Specific Attendance Code"</h3>
            <form class="grid gap-4 md:grid-cols-2" on:submit=on_submit>
                <div>
                    <label for="selectedDate" class="block text-sm font-medium text-gray-700">"Select Date"</label>
                    <input
                        id="selectedDate"
                        type="date"
                        class="mt-1 w-full border rounded px-3 py-2"
                        prop:value=move || form.date.get()
                        on:change=move |ev| form.date.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="newCode" class="block text-sm font-medium text-gray-700">"Attendance Code"</label>
                    <input
                        id="newCode"
                        type="text"
                        class="mt-1 w-full border rounded px-3 py-2 tracking-widest"
                        maxlength=ATTENDANCE_CODE_MAX_LEN
                        placeholder=move || defined_code().unwrap_or_else(|| "e.g., 13HH".to_string())
                        prop:value=move || form.code.get()
                        on:input=move |ev| form.set_code(&event_target_value(&ev))
                    />
                </div>
                <div class="md:col-span-2">
                    <button
                        type="submit"
                        class="px-4 py-2 rounded bg-orange-600 text-white hover:bg-orange-700 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Saving..." } else { "Save Code" }}
                    </button>
                </div>
            </form>
            <InlineErrorMessage error=vm.code_error.into() />
            {move || vm.code_message.get().map(|msg| view! { <SuccessMessage message=msg /> })}
            {move || match defined_code() {
                Some(code) => view! {
                    <p class="text-sm text-gray-600">
                        {format!("Current code for {}: {}", form.date.get(), code)}
                    </p>
                }.into_view(),
                None => view! {
                    <p class="text-sm text-gray-500">"No code defined for this date."</p>
                }.into_view(),
            }}
            <Show when=move || !recent_codes().is_empty()>
                <div>
                    <h4 class="text-sm font-medium text-gray-700 mb-1">"Recent codes"</h4>
                    <ul class="text-sm text-gray-600 space-y-1">
                        {move || recent_codes().into_iter().map(|entry| view! {
                            <li>
                                <span class="font-mono">{entry.date.format("%Y-%m-%d").to_string()}</span>
                                " · "
                                <span class="font-semibold">{entry.code}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
            </Show>
        </section>
    }
}
