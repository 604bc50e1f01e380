use crate::components::layout::Layout;
use leptos::*;

#[component]
fn HomeLink(href: &'static str, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <a href=href class="block rounded-2xl border border-gray-200 bg-white p-6 shadow-sm hover:shadow-md">
            <h3 class="text-lg font-semibold text-gray-900">{title}</h3>
            <p class="mt-1 text-sm text-gray-600">{description}</p>
        </a>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Layout>
            <div class="text-center py-10">
                <h1 class="text-4xl font-extrabold text-gray-900 sm:text-5xl">"Rollcall"</h1>
                <p class="mt-3 text-base text-gray-600 sm:text-lg">
                    "Class registration and daily attendance"
                </p>
            </div>
            <div class="grid gap-4 md:grid-cols-3">
                <HomeLink
                    href="/register"
                    title="Register"
                    description="Get your Student ID and the class meeting details."
                />
                <HomeLink
                    href="/attendance"
                    title="Submit Attendance"
                    description="Enter your Student ID and today's code."
                />
                <HomeLink
                    href="/admin"
                    title="Admin"
                    description="Manage codes and review attendance."
                />
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn home_links_every_page() {
        let html = render_to_string(move || view! { <HomePage /> });
        assert!(html.contains("href=\"/register\""));
        assert!(html.contains("href=\"/attendance\""));
        assert!(html.contains("href=\"/admin\""));
    }
}
