use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Layout>
            <div class="text-center py-16">
                <h1 class="text-3xl font-bold text-gray-900">"Page not found"</h1>
                <p class="mt-2 text-gray-600">"The page you are looking for does not exist."</p>
                <a href="/" class="mt-6 inline-block text-orange-700 underline">"Back to home"</a>
            </div>
        </Layout>
    }
}
