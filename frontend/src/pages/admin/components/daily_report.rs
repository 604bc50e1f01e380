use crate::{
    api::{AttendanceStatus, DailyReport, DailyStatusRow},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::admin::view_model::AdminViewModel,
};
use leptos::*;

fn status_badge(status: AttendanceStatus) -> impl IntoView {
    view! {
        <span class=format!(
            "inline-flex px-2 py-1 text-xs font-semibold rounded-full {}",
            status.badge_class()
        )>
            {status.label()}
        </span>
    }
}

#[component]
pub fn DailyStatusTable(rows: Vec<DailyStatusRow>) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-gray-200 text-sm">
            <thead class="bg-gray-50">
                <tr>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Student ID"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Name"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Telegram"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Status"</th>
                    <th class="px-4 py-2 text-left font-medium text-gray-600">"Submitted Code"</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-100">
                {rows.into_iter().map(|row| view! {
                    <tr>
                        <td class="px-4 py-2 font-mono">{row.student_id}</td>
                        <td class="px-4 py-2">{row.student_name}</td>
                        <td class="px-4 py-2">{row.telegram_username.unwrap_or_else(|| "-".into())}</td>
                        <td class="px-4 py-2">{status_badge(row.status)}</td>
                        <td class="px-4 py-2 font-mono">{row.submitted_code.unwrap_or_else(|| "-".into())}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

fn render_report(report: DailyReport) -> View {
    let date = report.date.format("%Y-%m-%d").to_string();
    if report.session_code.is_none() {
        return view! {
            <p class="text-sm text-gray-600 py-4">
                {format!("No attendance code defined for {}. Set one above to see statuses.", date)}
            </p>
        }
        .into_view();
    }
    if report.rows.is_empty() {
        return view! { <p class="text-sm text-gray-600 py-4">"No students registered yet."</p> }
            .into_view();
    }
    view! { <DailyStatusTable rows=report.rows /> }.into_view()
}

#[component]
pub fn DailyReportSection(vm: AdminViewModel) -> impl IntoView {
    let export_pending = vm.export_action.pending();
    let report_error = Signal::derive(move || vm.daily_report.get().and_then(|r| r.err()));

    view! {
        <div class="space-y-3">
            <div class="flex items-center justify-between">
                <p class="text-sm text-gray-600">
                    {move || format!("Date: {}", vm.session_code_form.date.get())}
                </p>
                <button
                    type="button"
                    class="px-3 py-1 rounded border text-sm text-gray-700 hover:bg-gray-50 disabled:opacity-50"
                    disabled=move || export_pending.get()
                    on:click=move |_| vm.export_csv()
                >
                    {move || if export_pending.get() { "Exporting..." } else { "Export CSV" }}
                </button>
            </div>
            <InlineErrorMessage error=vm.export_error.into() />
            <InlineErrorMessage error=report_error />
            <div class="overflow-x-auto">
                {move || match vm.daily_report.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Ok(report)) => render_report(report),
                    Some(Err(_)) => ().into_view(),
                }}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use chrono::NaiveDate;

    fn row(id: &str, status: AttendanceStatus, code: Option<&str>) -> DailyStatusRow {
        DailyStatusRow {
            student_id: id.into(),
            student_name: format!("Student {}", id),
            telegram_username: None,
            status,
            submitted_code: code.map(str::to_string),
        }
    }

    #[test]
    fn table_renders_status_labels() {
        let html = render_to_string(move || {
            view! {
                <DailyStatusTable rows=vec![
                    row("WDF1001", AttendanceStatus::Present, Some("ABC")),
                    row("WDF1002", AttendanceStatus::AbsentNoInform, None),
                    row("WDF1003", AttendanceStatus::AbsentInformed, Some("XYZ")),
                ] />
            }
        });
        assert!(html.contains("Present"));
        assert!(html.contains("Absent (No Inform)"));
        assert!(html.contains("Absent (Informed)"));
        assert!(html.contains("XYZ"));
    }

    #[test]
    fn report_without_code_explains_why() {
        let html = render_to_string(move || {
            render_report(DailyReport {
                date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                session_code: None,
                rows: vec![row("WDF1001", AttendanceStatus::NoCode, None)],
            })
        });
        assert!(html.contains("No attendance code defined for 2026-03-02"));
        assert!(!html.contains("<table"));
    }
}
