use crate::{
    api::ApiError,
    components::error::{InlineErrorMessage, SuccessMessage},
    pages::attendance::{
        utils::{AttendanceFormState, ATTENDANCE_CODE_MAX_LEN, STUDENT_ID_MAX_LEN},
        view_model::SUCCESS_MESSAGE,
    },
};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "w-full px-4 py-4 border border-slate-300 rounded-2xl focus:outline-none focus:ring-2 focus:ring-orange-500/20 bg-slate-50/50 text-slate-900 placeholder-slate-400 text-lg tracking-widest";

#[component]
pub fn AttendanceForm(
    form: AttendanceFormState,
    error: Signal<Option<ApiError>>,
    success: Signal<bool>,
    pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="bg-white/80 rounded-3xl shadow-2xl max-w-md w-full mx-auto p-8 border border-slate-200/50">
            <div class="text-center mb-8">
                <h2 class="text-3xl font-light mb-2 text-slate-800 tracking-tight">"Attendance Form"</h2>
                <p class="text-sm text-slate-500">"Enter your Student ID and today's attendance code."</p>
            </div>
            <InlineErrorMessage error=error />
            <Show when=move || success.get()>
                <SuccessMessage message=SUCCESS_MESSAGE.to_string() />
            </Show>
            <form class="space-y-6" on:submit=move |ev| on_submit.call(ev)>
                <div>
                    <label for="studentId" class="block text-sm font-semibold text-slate-700 mb-3">"Student ID"</label>
                    <input
                        id="studentId"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="e.g., WDF1000"
                        maxlength=STUDENT_ID_MAX_LEN
                        autocomplete="off"
                        prop:value=move || form.student_id.get()
                        on:input=move |ev| form.set_student_id(&event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="attendanceCode" class="block text-sm font-semibold text-slate-700 mb-3">"Attendance Code"</label>
                    <input
                        id="attendanceCode"
                        type="text"
                        class=INPUT_CLASS
                        placeholder="e.g., 13HH"
                        maxlength=ATTENDANCE_CODE_MAX_LEN
                        autocomplete="off"
                        prop:value=move || form.attendance_code.get()
                        on:input=move |ev| form.set_attendance_code(&event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="w-full bg-orange-600 text-white py-4 rounded-2xl hover:bg-orange-700 font-semibold disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Submitting..." } else { "Submit Attendance" }}
                </button>
            </form>
        </div>
    }
}
