use super::{
    components::{card::StudentCard, form::RegisterForm},
    view_model::RegisterViewModel,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = RegisterViewModel::new();
    let pending = vm.register_action.pending();

    let on_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    });
    let next_id = Signal::derive(move || vm.next_id.get());

    view! {
        <Show
            when=move || vm.registered.get().is_some()
            fallback=move || view! {
                <RegisterForm
                    student_name=vm.form.student_name
                    telegram_username=vm.form.telegram_username
                    next_id=next_id
                    error=vm.error.into()
                    pending=pending.into()
                    on_submit=on_submit
                />
            }
        >
            {move || vm.registered.get().map(|registration| view! {
                <div class="space-y-4">
                    <StudentCard registration=registration />
                    <div class="text-center">
                        <button
                            type="button"
                            class="text-sm text-gray-600 underline hover:text-gray-900"
                            on:click=move |_| vm.register_another()
                        >
                            "Register another student"
                        </button>
                    </div>
                </div>
            })}
        </Show>
    }
}
