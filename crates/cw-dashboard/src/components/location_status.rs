//! Status line under the "get location" button

use cw_core::status::StatusView;
use leptos::*;

#[component]
pub fn LocationStatus(status: RwSignal<Option<StatusView>>) -> impl IntoView {
    view! {
        <div id="location-status" class="mt-2">
            {move || status.get().map(|view| view! {
                <small class=view.kind.text_class()>
                    <i class=format!("fas {} me-1", view.kind.icon_class())></i>
                    {view.message}
                </small>
            })}
        </div>
    }
}
