//! Dashboard page: incident map, statistics chart and the report form

use crate::app::ReportModalToggle;
use crate::browser::{self, BrowserGeolocation, CanvasChart, HttpClient, LeafletSurface};
use crate::components::*;
use crate::state::PageUi;
use cw_core::dashboard::{fetch_report_list, DashboardController};
use cw_core::geolocation::{CaptureOutcome, LocationCapture};
use cw_core::report::ReportRecord;
use cw_core::submission::ReportSubmission;
use cw_core::{DashboardConfig, DashboardPayload, RefreshStrategy};
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

const MAP_ELEMENT_ID: &str = "crime-map";
const CHART_ELEMENT_ID: &str = "crime-stats-chart";

type Dashboard = DashboardController<LeafletSurface, CanvasChart>;
type SharedDashboard = Rc<RefCell<Option<Dashboard>>>;

/// Attach Leaflet and Chart.js to the rendered page and draw `payload`
fn mount_dashboard(config: &DashboardConfig, payload: DashboardPayload) -> Result<Dashboard, String> {
    let map = LeafletSurface::mount(MAP_ELEMENT_ID).map_err(|e| format!("map: {e:?}"))?;
    let chart = CanvasChart::mount(CHART_ELEMENT_ID).map_err(|e| format!("chart: {e:?}"))?;

    let mut dashboard = DashboardController::new(map, chart, config.map.clone());
    dashboard.initialize().map_err(|e| e.to_string())?;
    dashboard.load_data(payload).map_err(|e| e.to_string())?;
    Ok(dashboard)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let payload = use_context::<DashboardPayload>().unwrap_or_default();
    let report_modal_open = use_context::<ReportModalToggle>()
        .map(|toggle| toggle.0)
        .unwrap_or_else(|| create_rw_signal(false));

    let recent = create_rw_signal(Vec::<ReportRecord>::new());
    let dashboard: SharedDashboard = Rc::new(RefCell::new(None));
    let client = Rc::new(HttpClient::new(&config));

    // Leaflet needs the container laid out, so wait a frame
    {
        let dashboard = dashboard.clone();
        let config = config.clone();
        request_animation_frame(move || match mount_dashboard(&config, payload) {
            Ok(mounted) => {
                recent.set(mounted.recent_reports().to_vec());
                *dashboard.borrow_mut() = Some(mounted);
            }
            Err(err) => tracing::error!("Dashboard failed to start: {}", err),
        });
    }

    on_cleanup({
        let dashboard = dashboard.clone();
        move || {
            if let Some(mut mounted) = dashboard.borrow_mut().take() {
                mounted.dispose();
            }
        }
    });

    let refresh = {
        let dashboard = dashboard.clone();
        let client = client.clone();
        let strategy = config.refresh;
        Callback::new(move |_: ()| match strategy {
            RefreshStrategy::Reload => browser::reload_page(),
            RefreshStrategy::Refetch => {
                let dashboard = dashboard.clone();
                let client = client.clone();
                spawn_local(async move {
                    let Some(reports) = fetch_report_list(client.as_ref()).await else {
                        return;
                    };
                    let mut slot = dashboard.borrow_mut();
                    let Some(mounted) = slot.as_mut() else {
                        return;
                    };
                    match mounted.replace_reports(reports) {
                        Ok(_) => {
                            recent.set(mounted.recent_reports().to_vec());
                            tracing::info!("Dashboard data refreshed");
                        }
                        Err(err) => tracing::error!("Error refreshing dashboard: {}", err),
                    }
                });
            }
        })
    };

    let ui = PageUi::new(report_modal_open, config.alert_ttl(), refresh);

    let on_locate = {
        let capture = Rc::new(LocationCapture::new(config.geolocation));
        Callback::new(move |_: ()| {
            let capture = capture.clone();
            spawn_local(async move {
                if let CaptureOutcome::Captured(coords) =
                    capture.capture(&BrowserGeolocation, &ui).await
                {
                    let (latitude, longitude) = coords.form_values();
                    ui.latitude.set(latitude);
                    ui.longitude.set(longitude);
                }
            });
        })
    };

    let on_submit = {
        let submission = Rc::new(ReportSubmission::new(config.reload_delay()));
        Callback::new(move |_: ()| {
            let submission = submission.clone();
            let client = client.clone();
            let form = ui.form();
            spawn_local(async move {
                match submission.submit(&form, client.as_ref(), &ui).await {
                    Ok(outcome) => tracing::debug!("Submission finished: {:?}", outcome),
                    Err(err) => tracing::debug!("Submission not sent: {}", err),
                }
            });
        })
    };

    view! {
        <div class="container-fluid py-3">
            <AlertStack ui=ui/>

            <div class="row g-3">
                <div class="col-lg-8">
                    <div class="card bg-dark border-secondary">
                        <div class="card-header">
                            <i class="fas fa-map-marked-alt me-2"></i>
                            "Incident Map"
                        </div>
                        <div id=MAP_ELEMENT_ID style="height: 520px;"></div>
                    </div>
                </div>

                <div class="col-lg-4 d-flex flex-column gap-3">
                    <div class="card bg-dark border-secondary">
                        <div class="card-header">
                            <i class="fas fa-chart-pie me-2"></i>
                            "Crime Statistics"
                        </div>
                        <div class="card-body" style="height: 300px;">
                            <canvas id=CHART_ELEMENT_ID></canvas>
                        </div>
                    </div>
                    <RecentAlerts reports=recent/>
                </div>
            </div>

            <ReportModal ui=ui on_locate=on_locate on_submit=on_submit/>
            <LoadingModal open=ui.loading_open/>
        </div>
    }
}
