//! Incident report form in a modal dialog

use super::LocationStatus;
use crate::state::PageUi;
use leptos::*;

#[component]
pub fn ReportModal(
    ui: PageUi,
    on_locate: Callback<()>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let close = move |_: ev::MouseEvent| ui.report_modal_open.set(false);

    view! {
        <Show when=move || ui.report_modal_open.get()>
            <div
                id="reportModal"
                class="modal fade show d-block"
                tabindex="-1"
                style="background: rgba(0, 0, 0, 0.5);"
            >
                <div class="modal-dialog modal-dialog-centered">
                    <div class="modal-content bg-dark text-light">
                        <div class="modal-header">
                            <h5 class="modal-title">
                                <i class="fas fa-exclamation-triangle me-2 text-warning"></i>
                                "Report an Incident"
                            </h5>
                            <button type="button" class="btn-close btn-close-white" on:click=close></button>
                        </div>
                        <div class="modal-body">
                            <form id="crime-report-form" on:submit=|event: ev::SubmitEvent| event.prevent_default()>
                                <div class="mb-3">
                                    <label for="incident-description" class="form-label">
                                        "What happened?"
                                    </label>
                                    <textarea
                                        id="incident-description"
                                        class="form-control"
                                        rows="4"
                                        placeholder="Describe the incident..."
                                        prop:value=move || ui.description.get()
                                        on:input=move |ev| ui.description.set(event_target_value(&ev))
                                    ></textarea>
                                </div>

                                <div class="row g-2">
                                    <div class="col">
                                        <input
                                            id="latitude"
                                            type="text"
                                            class="form-control"
                                            placeholder="Latitude"
                                            prop:value=move || ui.latitude.get()
                                            on:input=move |ev| ui.latitude.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <div class="col">
                                        <input
                                            id="longitude"
                                            type="text"
                                            class="form-control"
                                            placeholder="Longitude"
                                            prop:value=move || ui.longitude.get()
                                            on:input=move |ev| ui.longitude.set(event_target_value(&ev))
                                        />
                                    </div>
                                </div>

                                <button
                                    id="get-location"
                                    type="button"
                                    class="btn btn-outline-info btn-sm mt-2"
                                    on:click=move |_| on_locate.call(())
                                >
                                    <i class="fas fa-location-arrow me-1"></i>
                                    "Use My Location"
                                </button>
                                <LocationStatus status=ui.location_status/>
                            </form>
                        </div>
                        <div class="modal-footer">
                            <button type="button" class="btn btn-secondary" on:click=close>
                                "Cancel"
                            </button>
                            <button
                                id="submit-report"
                                type="button"
                                class="btn btn-danger"
                                prop:disabled=move || ui.submit_disabled.get()
                                on:click=move |_| on_submit.call(())
                            >
                                <Show when=move || ui.submit_disabled.get()>
                                    <i class="fas fa-spinner fa-spin me-2"></i>
                                </Show>
                                {move || ui.submit_label.get()}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
