//! Sidebar list of the latest verified reports

use cw_core::dashboard::markers::{category_color, trust_percent, truncate_description};
use cw_core::report::ReportRecord;
use leptos::*;

#[component]
pub fn RecentAlerts(reports: RwSignal<Vec<ReportRecord>>) -> impl IntoView {
    view! {
        <div class="card bg-dark border-secondary">
            <div class="card-header">
                <i class="fas fa-bell me-2"></i>
                "Recent Alerts"
            </div>
            <ul class="list-group list-group-flush">
                <Show
                    when=move || !reports.with(Vec::is_empty)
                    fallback=|| view! {
                        <li class="list-group-item bg-dark text-muted">"No recent alerts"</li>
                    }
                >
                    {move || reports.get().into_iter().map(|report| {
                        let category = report.category_or_unknown().to_string();
                        let color = category_color(&category);
                        let text = report
                            .original_text
                            .as_deref()
                            .map(truncate_description)
                            .unwrap_or_default();
                        let trust = trust_percent(report.trust_score.unwrap_or(0.0));
                        view! {
                            <li class="list-group-item bg-dark text-light">
                                <div class="d-flex justify-content-between">
                                    <strong style=format!("color: {color};")>{category}</strong>
                                    <small class="text-muted">{format!("Trust: {trust}%")}</small>
                                </div>
                                <small>{text}</small>
                            </li>
                        }
                    }).collect_view()}
                </Show>
            </ul>
        </div>
    }
}
