use super::{components::form::AttendanceForm, view_model::AttendanceViewModel};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn AttendancePanel() -> impl IntoView {
    let vm = AttendanceViewModel::new();
    let on_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    });

    view! {
        <AttendanceForm
            form=vm.form
            error=vm.error.into()
            success=vm.success.into()
            pending=vm.submit_action.pending().into()
            on_submit=on_submit
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn attendance_panel_renders_both_fields() {
        let html = render_to_string(move || view! { <AttendancePanel /> });
        assert!(html.contains("Attendance Form"));
        assert!(html.contains("Student ID"));
        assert!(html.contains("Attendance Code"));
        assert!(html.contains("Submit Attendance"));
        assert!(!html.contains("Attendance submitted successfully!"));
    }
}
