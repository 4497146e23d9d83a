//! Navigation component

use crate::app::ReportModalToggle;
use leptos::*;

#[component]
pub fn Nav() -> impl IntoView {
    let open_report = use_context::<ReportModalToggle>().map(|toggle| toggle.0);

    view! {
        <nav class="navbar navbar-dark bg-dark border-bottom border-secondary">
            <div class="container-fluid">
                <a href="/" class="navbar-brand fw-bold">
                    <i class="fas fa-shield-alt me-2"></i>
                    "Crime Watch"
                </a>
                <button
                    type="button"
                    class="btn btn-danger"
                    on:click=move |_| {
                        if let Some(open) = open_report {
                            open.set(true);
                        }
                    }
                >
                    <i class="fas fa-plus me-2"></i>
                    "Report Incident"
                </button>
            </div>
        </nav>
    }
}
