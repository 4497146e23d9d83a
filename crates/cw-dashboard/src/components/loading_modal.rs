//! Blocking modal shown while a report is processed

use leptos::*;

#[component]
pub fn LoadingModal(open: RwSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div
                id="loadingModal"
                class="modal fade show d-block"
                tabindex="-1"
                style="background: rgba(0, 0, 0, 0.6);"
            >
                <div class="modal-dialog modal-dialog-centered modal-sm">
                    <div class="modal-content bg-dark text-light text-center p-4">
                        <div class="spinner-border text-info mx-auto mb-3" role="status"></div>
                        <p class="mb-0">"Analyzing your report..."</p>
                    </div>
                </div>
            </div>
        </Show>
    }
}
