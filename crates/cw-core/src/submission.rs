//! Report submission workflow
//!
//! Drives one submission from the click on the submit button to the alert
//! that closes it out:
//!
//! ```text
//! Idle -> Validating -> Submitting -> Succeeded | Rejected | Failed -> Idle
//! ```
//!
//! The page is reached only through [`SubmissionUi`] and the network only
//! through [`ReportTransport`].

use crate::busy::BusyLatch;
use crate::report::{ReportDraft, ReportForm, SubmitResponse, ValidationError};
use crate::status::AlertLevel;
use async_trait::async_trait;
use std::cell::Cell;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

pub const PROGRESS_LABEL: &str = "Processing...";
pub const ACCEPTED_MESSAGE: &str =
    "Report submitted successfully! The page will reload to show updated data.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Report could not be processed. Please try again.";
pub const CONNECTIVITY_MESSAGE: &str =
    "Error submitting report. Please check your connection and try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Why a submit click did not reach the network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted,
    Rejected(String),
    TransportError(TransportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Rejected,
    Failed,
}

/// Sends a draft to the processing endpoint
#[async_trait(?Send)]
pub trait ReportTransport {
    /// Non-2xx statuses and undecodable bodies are errors
    async fn submit_report(&self, draft: &ReportDraft) -> Result<SubmitResponse, TransportError>;
}

/// The page elements the workflow touches
pub trait SubmissionUi {
    /// Blocking prompt for a form that failed validation
    fn prompt(&self, message: &str);

    /// Current label of the submit button
    fn submit_label(&self) -> String;

    fn set_submit_control(&self, disabled: bool, label: &str);

    fn show_loading(&self);

    fn hide_loading(&self);

    fn close_report_modal(&self);

    /// Clear the form fields and the location status line
    fn reset_form(&self);

    fn show_alert(&self, level: AlertLevel, message: &str);

    /// Bring in server data after `delay`
    fn schedule_refresh(&self, delay: Duration);
}

/// Holds the submit button in its busy state. Dropping the guard restores the
/// button, so every exit path releases it exactly once.
pub struct SubmitControlGuard<'a, U: SubmissionUi + ?Sized> {
    ui: &'a U,
    original_label: String,
}

impl<'a, U: SubmissionUi + ?Sized> SubmitControlGuard<'a, U> {
    pub fn engage(ui: &'a U) -> Self {
        let original_label = ui.submit_label();
        ui.set_submit_control(true, PROGRESS_LABEL);
        Self { ui, original_label }
    }
}

impl<U: SubmissionUi + ?Sized> Drop for SubmitControlGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_submit_control(false, &self.original_label);
    }
}

/// The submission workflow, one instance per report form
#[derive(Debug)]
pub struct ReportSubmission {
    latch: BusyLatch,
    state: Cell<SubmissionState>,
    refresh_delay: Duration,
}

impl Default for ReportSubmission {
    fn default() -> Self {
        Self::new(Duration::from_millis(2_000))
    }
}

impl ReportSubmission {
    pub fn new(refresh_delay: Duration) -> Self {
        Self {
            latch: BusyLatch::new(),
            state: Cell::new(SubmissionState::Idle),
            refresh_delay,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    /// Validate `form` and send it
    pub async fn submit<T, U>(
        &self,
        form: &ReportForm,
        transport: &T,
        ui: &U,
    ) -> Result<SubmissionOutcome, SubmitError>
    where
        T: ReportTransport + ?Sized,
        U: SubmissionUi + ?Sized,
    {
        let Some(_busy) = self.latch.try_acquire() else {
            debug!("Submission already in progress, ignoring click");
            return Err(SubmitError::Busy);
        };

        self.state.set(SubmissionState::Validating);
        let draft = match ReportDraft::from_form(form) {
            Ok(draft) => draft,
            Err(err) => {
                ui.prompt(&err.to_string());
                self.state.set(SubmissionState::Idle);
                return Err(err.into());
            }
        };

        self.state.set(SubmissionState::Submitting);
        let control = SubmitControlGuard::engage(ui);
        ui.show_loading();

        let outcome = match transport.submit_report(&draft).await {
            Ok(response) if response.success => {
                self.state.set(SubmissionState::Succeeded);
                ui.hide_loading();
                ui.close_report_modal();
                ui.reset_form();
                ui.show_alert(AlertLevel::Success, ACCEPTED_MESSAGE);
                ui.schedule_refresh(self.refresh_delay);
                info!("Report accepted");
                SubmissionOutcome::Accepted
            }
            Ok(response) => {
                self.state.set(SubmissionState::Rejected);
                ui.hide_loading();
                let message = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());
                ui.show_alert(AlertLevel::Warning, &message);
                info!("Report rejected: {}", message);
                SubmissionOutcome::Rejected(message)
            }
            Err(err) => {
                self.state.set(SubmissionState::Failed);
                ui.hide_loading();
                error!("Error submitting report: {}", err);
                ui.show_alert(AlertLevel::Danger, CONNECTIVITY_MESSAGE);
                SubmissionOutcome::TransportError(err)
            }
        };

        drop(control);
        self.state.set(SubmissionState::Idle);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tokio::sync::oneshot;

    const SUBMIT_LABEL: &str = "Submit Report";

    #[derive(Debug, Clone, PartialEq)]
    enum UiEvent {
        Prompt(String),
        Control(bool, String),
        ShowLoading,
        HideLoading,
        CloseReportModal,
        ResetForm,
        Alert(AlertLevel, String),
        Refresh(Duration),
    }

    struct RecordingUi {
        events: RefCell<Vec<UiEvent>>,
        disabled: Cell<bool>,
        label: RefCell<String>,
    }

    impl RecordingUi {
        fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
                disabled: Cell::new(false),
                label: RefCell::new(SUBMIT_LABEL.to_string()),
            }
        }

        fn events(&self) -> Vec<UiEvent> {
            self.events.borrow().clone()
        }

        fn has(&self, event: &UiEvent) -> bool {
            self.events.borrow().contains(event)
        }

        fn alerts(&self) -> Vec<(AlertLevel, String)> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    UiEvent::Alert(level, message) => Some((*level, message.clone())),
                    _ => None,
                })
                .collect()
        }

        fn assert_control_restored(&self) {
            assert!(!self.disabled.get());
            assert_eq!(*self.label.borrow(), SUBMIT_LABEL);
            let releases = self
                .events
                .borrow()
                .iter()
                .filter(|e| matches!(e, UiEvent::Control(false, _)))
                .count();
            assert_eq!(releases, 1);
        }
    }

    impl SubmissionUi for RecordingUi {
        fn prompt(&self, message: &str) {
            self.events.borrow_mut().push(UiEvent::Prompt(message.to_string()));
        }

        fn submit_label(&self) -> String {
            self.label.borrow().clone()
        }

        fn set_submit_control(&self, disabled: bool, label: &str) {
            self.disabled.set(disabled);
            *self.label.borrow_mut() = label.to_string();
            self.events
                .borrow_mut()
                .push(UiEvent::Control(disabled, label.to_string()));
        }

        fn show_loading(&self) {
            self.events.borrow_mut().push(UiEvent::ShowLoading);
        }

        fn hide_loading(&self) {
            self.events.borrow_mut().push(UiEvent::HideLoading);
        }

        fn close_report_modal(&self) {
            self.events.borrow_mut().push(UiEvent::CloseReportModal);
        }

        fn reset_form(&self) {
            self.events.borrow_mut().push(UiEvent::ResetForm);
        }

        fn show_alert(&self, level: AlertLevel, message: &str) {
            self.events
                .borrow_mut()
                .push(UiEvent::Alert(level, message.to_string()));
        }

        fn schedule_refresh(&self, delay: Duration) {
            self.events.borrow_mut().push(UiEvent::Refresh(delay));
        }
    }

    struct StubTransport {
        response: Result<SubmitResponse, TransportError>,
        sent: RefCell<Vec<ReportDraft>>,
    }

    impl StubTransport {
        fn new(response: Result<SubmitResponse, TransportError>) -> Self {
            Self {
                response,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ReportTransport for StubTransport {
        async fn submit_report(
            &self,
            draft: &ReportDraft,
        ) -> Result<SubmitResponse, TransportError> {
            self.sent.borrow_mut().push(draft.clone());
            self.response.clone()
        }
    }

    fn market_form() -> ReportForm {
        ReportForm::new("Stolen phone at market", "6.5", "3.4")
    }

    #[tokio::test]
    async fn test_blank_description_blocks_before_network() {
        for description in ["", "   ", "\n\t "] {
            let transport = StubTransport::new(Ok(SubmitResponse::default()));
            let ui = RecordingUi::new();
            let workflow = ReportSubmission::default();

            let result = workflow
                .submit(&ReportForm::new(description, "6.5", "3.4"), &transport, &ui)
                .await;

            assert_eq!(
                result,
                Err(SubmitError::Validation(ValidationError::EmptyDescription))
            );
            assert!(transport.sent.borrow().is_empty());
            assert_eq!(
                ui.events(),
                vec![UiEvent::Prompt("Please provide an incident description.".into())]
            );
            assert_eq!(workflow.state(), SubmissionState::Idle);
        }
    }

    #[tokio::test]
    async fn test_accepted_report() {
        let transport = StubTransport::new(Ok(SubmitResponse {
            success: true,
            message: Some("Report processed and saved successfully".into()),
        }));
        let ui = RecordingUi::new();
        let workflow = ReportSubmission::default();

        let outcome = workflow.submit(&market_form(), &transport, &ui).await;

        assert_eq!(outcome, Ok(SubmissionOutcome::Accepted));
        assert_eq!(
            transport.sent.borrow()[0],
            ReportDraft {
                description: "Stolen phone at market".into(),
                latitude: 6.5,
                longitude: 3.4,
            }
        );
        assert_eq!(
            ui.events(),
            vec![
                UiEvent::Control(true, PROGRESS_LABEL.into()),
                UiEvent::ShowLoading,
                UiEvent::HideLoading,
                UiEvent::CloseReportModal,
                UiEvent::ResetForm,
                UiEvent::Alert(AlertLevel::Success, ACCEPTED_MESSAGE.into()),
                UiEvent::Refresh(Duration::from_millis(2000)),
                UiEvent::Control(false, SUBMIT_LABEL.into()),
            ]
        );
        ui.assert_control_restored();
        assert_eq!(workflow.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_rejected_report_keeps_form() {
        let transport = StubTransport::new(Ok(SubmitResponse {
            success: false,
            message: Some("duplicate report".into()),
        }));
        let ui = RecordingUi::new();

        let outcome = ReportSubmission::default()
            .submit(&market_form(), &transport, &ui)
            .await;

        assert_eq!(
            outcome,
            Ok(SubmissionOutcome::Rejected("duplicate report".into()))
        );
        assert_eq!(
            ui.alerts(),
            vec![(AlertLevel::Warning, "duplicate report".to_string())]
        );
        assert!(ui.has(&UiEvent::HideLoading));
        assert!(!ui.has(&UiEvent::ResetForm));
        assert!(!ui.has(&UiEvent::CloseReportModal));
        assert!(!ui.events().iter().any(|e| matches!(e, UiEvent::Refresh(_))));
        ui.assert_control_restored();
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        for message in [None, Some(String::new())] {
            let transport = StubTransport::new(Ok(SubmitResponse {
                success: false,
                message,
            }));
            let ui = RecordingUi::new();

            let outcome = ReportSubmission::default()
                .submit(&market_form(), &transport, &ui)
                .await;

            assert_eq!(
                outcome,
                Ok(SubmissionOutcome::Rejected(REJECTED_FALLBACK_MESSAGE.into()))
            );
            ui.assert_control_restored();
        }
    }

    #[tokio::test]
    async fn test_transport_failures_share_one_path() {
        let failures = [
            TransportError::Network("connection refused".into()),
            TransportError::Status(500),
            TransportError::Decode("expected value at line 1".into()),
        ];

        for failure in failures {
            let transport = StubTransport::new(Err(failure.clone()));
            let ui = RecordingUi::new();
            let workflow = ReportSubmission::default();

            let outcome = workflow.submit(&market_form(), &transport, &ui).await;

            assert_eq!(outcome, Ok(SubmissionOutcome::TransportError(failure)));
            assert_eq!(
                ui.alerts(),
                vec![(AlertLevel::Danger, CONNECTIVITY_MESSAGE.to_string())]
            );
            assert!(ui.has(&UiEvent::HideLoading));
            assert!(!ui.has(&UiEvent::ResetForm));
            ui.assert_control_restored();
            assert_eq!(workflow.state(), SubmissionState::Idle);
        }
    }

    struct HeldTransport {
        release: RefCell<Option<oneshot::Receiver<()>>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ReportTransport for HeldTransport {
        async fn submit_report(
            &self,
            _draft: &ReportDraft,
        ) -> Result<SubmitResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            let rx = self.release.borrow_mut().take();
            if let Some(rx) = rx {
                let _ = rx.await;
            }
            Ok(SubmitResponse {
                success: true,
                message: None,
            })
        }
    }

    #[tokio::test]
    async fn test_second_click_while_submitting_is_ignored() {
        let (tx, rx) = oneshot::channel();
        let transport = HeldTransport {
            release: RefCell::new(Some(rx)),
            calls: Cell::new(0),
        };
        let ui = RecordingUi::new();
        let workflow = ReportSubmission::default();
        let form = market_form();

        let (first, second) = tokio::join!(workflow.submit(&form, &transport, &ui), async {
            tokio::task::yield_now().await;
            assert_eq!(workflow.state(), SubmissionState::Submitting);
            let second = workflow.submit(&form, &transport, &ui).await;
            tx.send(()).unwrap();
            second
        });

        assert_eq!(first, Ok(SubmissionOutcome::Accepted));
        assert_eq!(second, Err(SubmitError::Busy));
        assert_eq!(transport.calls.get(), 1);
        ui.assert_control_restored();
    }
}
