use crate::{
    components::error::{InlineErrorMessage, SuccessMessage},
    pages::admin::view_model::AdminViewModel,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn MeetingSection(vm: AdminViewModel) -> impl IntoView {
    let pending = vm.meeting_action.pending();
    let form = vm.meeting_form;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_meeting();
    };
    let current = move || {
        vm.current_meeting()
            .map(|m| format!("Current: Meeting ID {}, Password {}", m.meeting_id, m.password))
            .unwrap_or_else(|| "No meeting details configured yet.".to_string())
    };

    view! {
        <section class="bg-white shadow rounded-lg p-6 space-y-4">
            <div>
                <h3 class="text-lg font-semibold text-orange-700">"Meeting Settings"</h3>
                <p class="text-sm text-gray-600">"Leave a field empty to keep its current value."</p>
            </div>
            <form class="grid gap-4 md:grid-cols-2" on:submit=on_submit>
                <div>
                    <label for="meetingId" class="block text-sm font-medium text-gray-700">"Meeting ID"</label>
                    <input
                        id="meetingId"
                        type="text"
                        inputmode="numeric"
                        class="mt-1 w-full border rounded px-3 py-2"
                        placeholder="Meeting ID"
                        prop:value=move || form.meeting_id.get()
                        on:input=move |ev| form.set_meeting_id(&event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="meetingPassword" class="block text-sm font-medium text-gray-700">"Meeting Password"</label>
                    <input
                        id="meetingPassword"
                        type="password"
                        class="mt-1 w-full border rounded px-3 py-2"
                        placeholder="Meeting Password"
                        prop:value=move || form.password.get()
                        on:input=move |ev| form.password.set(event_target_value(&ev))
                    />
                </div>
                <div class="md:col-span-2">
                    <button
                        type="submit"
                        class="px-4 py-2 rounded bg-orange-600 text-white hover:bg-orange-700 disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Saving..." } else { "Save Meeting Details" }}
                    </button>
                </div>
            </form>
            <InlineErrorMessage error=vm.meeting_error.into() />
            {move || vm.meeting_message.get().map(|msg| view! { <SuccessMessage message=msg /> })}
            <p class="text-sm text-gray-600">{current}</p>
        </section>
    }
}
