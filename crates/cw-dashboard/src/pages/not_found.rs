use leptos::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="container py-5 text-center">
            <h1 class="display-6">"Page not found"</h1>
            <a href="/" class="btn btn-outline-light mt-3">"Back to the dashboard"</a>
        </div>
    }
}
