use crate::api::ApiError;
use leptos::*;

fn extra_validation_messages(error: &ApiError) -> Vec<String> {
    if error.code != "VALIDATION_ERROR" {
        return Vec::new();
    }
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|v| v.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.as_str())
                .filter(|msg| *msg != error.error)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-xl space-y-1 my-2 text-sm font-medium">
                <p>{move || error.get().map(|e| e.error).unwrap_or_default()}</p>
                {move || {
                    let extra = error.get().map(|e| extra_validation_messages(&e)).unwrap_or_default();
                    (!extra.is_empty()).then(|| view! {
                        <ul class="list-disc list-inside">
                            {extra.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                        </ul>
                    })
                }}
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div class="bg-green-50 border border-green-200 text-green-700 px-4 py-3 rounded-xl my-2 text-sm font-medium">
            <p>{move || message.get()}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_lists_additional_validation_messages() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Student Name is required.".into(),
                code: "VALIDATION_ERROR".into(),
                details: Some(json!({
                    "errors": ["Student Name is required.", "Telegram Username is required."]
                })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Student Name is required."));
        assert!(html.contains("<li>Telegram Username is required.</li>"));
        assert!(!html.contains("<li>Student Name is required.</li>"));
    }

    #[test]
    fn inline_error_hidden_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(!html.contains("bg-red-50"));
    }

    #[test]
    fn success_message_renders_text() {
        let html = render_to_string(move || {
            view! { <SuccessMessage message="Attendance submitted successfully!".to_string() /> }
        });
        assert!(html.contains("Attendance submitted successfully!"));
    }
}
