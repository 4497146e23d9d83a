//! Reactive page state and the `cw-core` UI seams implemented on it

use crate::browser;
use cw_core::report::ReportForm;
use cw_core::status::{Alert, AlertLevel, StatusPresenter, StatusView};
use cw_core::submission::SubmissionUi;
use leptos::*;
use std::time::Duration;
use uuid::Uuid;

pub const SUBMIT_LABEL: &str = "Submit Report";

/// Signals behind the report form, the modals and the alert stack.
/// Everything is `Copy`, so handlers capture it by value.
#[derive(Clone, Copy)]
pub struct PageUi {
    pub description: RwSignal<String>,
    pub latitude: RwSignal<String>,
    pub longitude: RwSignal<String>,
    pub location_status: RwSignal<Option<StatusView>>,
    pub submit_disabled: RwSignal<bool>,
    pub submit_label: RwSignal<String>,
    pub loading_open: RwSignal<bool>,
    pub report_modal_open: RwSignal<bool>,
    pub alerts: RwSignal<Vec<Alert>>,
    alert_ttl: Duration,
    refresh: Callback<()>,
}

impl PageUi {
    pub fn new(report_modal_open: RwSignal<bool>, alert_ttl: Duration, refresh: Callback<()>) -> Self {
        Self {
            description: create_rw_signal(String::new()),
            latitude: create_rw_signal(String::new()),
            longitude: create_rw_signal(String::new()),
            location_status: create_rw_signal(None),
            submit_disabled: create_rw_signal(false),
            submit_label: create_rw_signal(SUBMIT_LABEL.to_string()),
            loading_open: create_rw_signal(false),
            report_modal_open,
            alerts: create_rw_signal(Vec::new()),
            alert_ttl,
            refresh,
        }
    }

    /// Snapshot of the form fields
    pub fn form(&self) -> ReportForm {
        ReportForm::new(
            self.description.get_untracked(),
            self.latitude.get_untracked(),
            self.longitude.get_untracked(),
        )
    }

    pub fn push_alert(&self, level: AlertLevel, message: &str) {
        let alert = Alert::new(level, message);
        let id = alert.id;
        self.alerts.update(|alerts| alerts.insert(0, alert));

        let alerts = self.alerts;
        set_timeout(
            move || {
                alerts.try_update(|alerts| alerts.retain(|a| a.id != id));
            },
            self.alert_ttl,
        );
    }

    pub fn dismiss_alert(&self, id: Uuid) {
        self.alerts.update(|alerts| alerts.retain(|a| a.id != id));
    }
}

impl StatusPresenter for PageUi {
    fn show_status(&self, view: StatusView) {
        self.location_status.set(Some(view));
    }

    fn clear_status(&self) {
        self.location_status.set(None);
    }
}

impl SubmissionUi for PageUi {
    fn prompt(&self, message: &str) {
        browser::prompt(message);
    }

    fn submit_label(&self) -> String {
        self.submit_label.get_untracked()
    }

    fn set_submit_control(&self, disabled: bool, label: &str) {
        self.submit_disabled.set(disabled);
        self.submit_label.set(label.to_string());
    }

    fn show_loading(&self) {
        self.loading_open.set(true);
    }

    fn hide_loading(&self) {
        self.loading_open.set(false);
    }

    fn close_report_modal(&self) {
        self.report_modal_open.set(false);
    }

    fn reset_form(&self) {
        self.description.set(String::new());
        self.latitude.set(String::new());
        self.longitude.set(String::new());
        self.clear_status();
    }

    fn show_alert(&self, level: AlertLevel, message: &str) {
        self.push_alert(level, message);
    }

    fn schedule_refresh(&self, delay: Duration) {
        let refresh = self.refresh;
        set_timeout(move || refresh.call(()), delay);
    }
}
