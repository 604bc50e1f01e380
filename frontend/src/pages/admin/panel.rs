use crate::pages::admin::{
    components::{
        absentees::AbsenteeSection, daily_report::DailyReportSection, login::AdminLoginForm,
        meeting::MeetingSection, session_code::SessionCodeSection,
    },
    layout::AdminDashboardScaffold,
    utils::AdminTab,
    view_model::{use_admin_login_view_model, use_admin_view_model, AdminViewModel},
};
use crate::state::auth::use_auth;
use leptos::*;

fn tab_class(active: bool) -> &'static str {
    if active {
        "py-2 px-4 text-sm font-medium rounded-lg bg-orange-600 text-white"
    } else {
        "py-2 px-4 text-sm font-medium rounded-lg text-gray-600 hover:text-orange-700"
    }
}

#[component]
fn AdminReports(vm: AdminViewModel) -> impl IntoView {
    let tab_button = move |tab: AdminTab| {
        view! {
            <button
                type="button"
                class=move || tab_class(vm.active_tab.get() == tab)
                on:click=move |_| vm.active_tab.set(tab)
            >
                {move || tab.label(vm.absence_threshold())}
            </button>
        }
    };
    let student_count = move || {
        vm.dashboard
            .get()
            .and_then(|r| r.ok())
            .map(|d| format!("{} registered students", d.students.len()))
            .unwrap_or_default()
    };

    view! {
        <section class="bg-white shadow rounded-lg p-6 space-y-4">
            <div class="flex flex-col gap-2 md:flex-row md:items-center md:justify-between">
                <nav class="flex space-x-2" aria-label="Tabs">
                    {tab_button(AdminTab::DailyStatus)}
                    {tab_button(AdminTab::Absentees)}
                </nav>
                <div class="flex items-center gap-3">
                    <span class="text-sm text-gray-500">{student_count}</span>
                    <button
                        type="button"
                        class="px-3 py-1 rounded border text-sm text-gray-700 hover:bg-gray-50"
                        on:click=move |_| vm.refresh()
                    >
                        "Refresh"
                    </button>
                </div>
            </div>
            {move || match vm.active_tab.get() {
                AdminTab::DailyStatus => view! { <DailyReportSection vm=vm /> }.into_view(),
                AdminTab::Absentees => view! { <AbsenteeSection vm=vm /> }.into_view(),
            }}
        </section>
    }
}

#[component]
fn AdminDashboard() -> impl IntoView {
    let vm = use_admin_view_model();
    view! {
        <div class="grid gap-6 lg:grid-cols-2">
            <MeetingSection vm=vm />
            <SessionCodeSection vm=vm />
        </div>
        <AdminReports vm=vm />
    }
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let (auth, _) = use_auth();
    let signed_in = Signal::derive(move || auth.get().is_authenticated);
    let login_vm = use_admin_login_view_model();

    view! {
        <AdminDashboardScaffold
            signed_in=signed_in
            login=move || view! { <AdminLoginForm vm=login_vm /> }
        >
            <AdminDashboard />
        </AdminDashboardScaffold>
    }
}
