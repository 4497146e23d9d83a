//! Main application component

use crate::components::*;
use crate::pages::*;
use cw_core::{DashboardConfig, DashboardPayload};
use leptos::*;
use leptos_router::*;

#[component]
pub fn App(config: DashboardConfig, payload: DashboardPayload) -> impl IntoView {
    provide_context(config);
    provide_context(payload);

    let report_modal_open = create_rw_signal(false);
    provide_context(ReportModalToggle(report_modal_open));

    view! {
        <Router>
            <div class="min-vh-100 bg-dark text-light">
                <Nav/>
                <main>
                    <Routes>
                        <Route path="/" view=DashboardPage/>
                        <Route path="/*any" view=NotFound/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Shared open/closed flag of the report modal
#[derive(Clone, Copy)]
pub struct ReportModalToggle(pub RwSignal<bool>);
