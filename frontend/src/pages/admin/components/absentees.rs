use crate::{
    api::{AbsenteeReport, AbsenteeRow},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::admin::view_model::AdminViewModel,
    utils::time::format_last_attendance,
};
use leptos::*;

#[component]
pub fn AbsenteeTable(rows: Vec<AbsenteeRow>, time_zone: String) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-gray-200 text-sm">
            <thead class="bg-gray-50">
                <tr>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Student ID"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Name"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Telegram"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Consecutive Absent Class Days"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Last Attendance"</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-100">
                {rows.into_iter().map(|row| {
                    let row_class = if row.long_term_absent { "bg-red-50" } else { "" };
                    view! {
                        <tr class=row_class>
                            <td class="px-4 py-2 font-mono">{row.student_id}</td>
                            <td class="px-4 py-2">{row.student_name}</td>
                            <td class="px-4 py-2">{row.telegram_username.unwrap_or_else(|| "-".into())}</td>
                            <td class="px-4 py-2">{format!("{} days", row.consecutive_misses)}</td>
                            <td class="px-4 py-2">
                                {format_last_attendance(row.last_attendance.as_ref(), &time_zone)}
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

fn render_report(report: AbsenteeReport, time_zone: String) -> View {
    if report.rows.is_empty() {
        return view! {
            <p class="text-sm text-gray-600 py-4">
                {format!(
                    "No students absent for {} or more class days.",
                    report.threshold
                )}
            </p>
        }
        .into_view();
    }
    view! {
        <div class="space-y-2">
            <p class="text-xs text-gray-500">
                {format!(
                    "As of {} across {} class days.",
                    report.as_of.format("%Y-%m-%d"),
                    report.class_days_considered
                )}
            </p>
            <AbsenteeTable rows=report.rows time_zone=time_zone />
        </div>
    }
    .into_view()
}

#[component]
pub fn AbsenteeSection(vm: AdminViewModel) -> impl IntoView {
    let report_error = Signal::derive(move || vm.absentees.get().and_then(|r| r.err()));

    view! {
        <div class="space-y-3">
            <label class="inline-flex items-center gap-2 text-sm text-gray-700">
                <input
                    type="checkbox"
                    prop:checked=move || vm.include_all.get()
                    on:change=move |ev| vm.include_all.set(event_target_checked(&ev))
                />
                "Show every student's count"
            </label>
            <InlineErrorMessage error=report_error />
            <div class="overflow-x-auto">
                {move || match vm.absentees.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Ok(report)) => render_report(report, vm.time_zone()),
                    Some(Err(_)) => ().into_view(),
                }}
            </div>
        </div>
    }
}
