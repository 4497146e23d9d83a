//! Dismissible alerts at the top of the dashboard

use crate::state::PageUi;
use leptos::*;

#[component]
pub fn AlertStack(ui: PageUi) -> impl IntoView {
    view! {
        <div class="alert-stack">
            <For
                each=move || ui.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    view! {
                        <div class=alert.level.css_class() role="alert">
                            {alert.message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| ui.dismiss_alert(id)
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}
