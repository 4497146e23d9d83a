//! Device geolocation: request options, failure classification and the
//! capture action behind the "get location" button.

use crate::busy::BusyLatch;
use crate::status::{StatusPresenter, StatusView};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const LOCATING_MESSAGE: &str = "Getting your location...";
pub const CAPTURED_MESSAGE: &str = "Location captured successfully!";
pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported by this browser.";

/// Options passed to the device position request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    /// Oldest cached position the device may hand back
    pub maximum_age_ms: u32,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 600_000,
        }
    }
}

/// A captured position, rounded to six decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn rounded(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round6(latitude),
            longitude: round6(longitude),
        }
    }

    /// Text for the latitude and longitude form fields
    pub fn form_values(&self) -> (String, String) {
        (
            format!("{:.6}", self.latitude),
            format!("{:.6}", self.longitude),
        )
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Why a position could not be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unknown,
}

impl FailureReason {
    /// Map a W3C `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => FailureReason::PermissionDenied,
            2 => FailureReason::Unavailable,
            3 => FailureReason::Timeout,
            _ => FailureReason::Unknown,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FailureReason::PermissionDenied => "Permission denied.",
            FailureReason::Unavailable => "Position unavailable.",
            FailureReason::Timeout => "Request timeout.",
            FailureReason::Unknown => "Unknown error.",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct GeolocationFailure {
    pub reason: FailureReason,
    pub message: String,
}

impl GeolocationFailure {
    pub fn new(reason: FailureReason) -> Self {
        Self {
            reason,
            message: format!("Unable to get location: {}", reason.describe()),
        }
    }

    pub fn from_code(code: u16) -> Self {
        Self::new(FailureReason::from_code(code))
    }

    /// The device has no geolocation capability at all
    pub fn unsupported() -> Self {
        Self {
            reason: FailureReason::Unavailable,
            message: UNSUPPORTED_MESSAGE.to_string(),
        }
    }
}

pub type GeolocationResult = Result<Coordinates, GeolocationFailure>;

/// Access to the device position
#[async_trait(?Send)]
pub trait GeolocationProvider {
    /// Whether the device exposes geolocation at all
    fn is_supported(&self) -> bool;

    /// Request the current position. Coordinates are returned unrounded.
    async fn current_position(&self, options: &PositionOptions) -> GeolocationResult;
}

/// Result of a "get location" click
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(Coordinates),
    Failed(GeolocationFailure),
    /// A request was already in flight
    Ignored,
}

/// The "get location" action with its single-flight guard
#[derive(Debug, Default)]
pub struct LocationCapture {
    options: PositionOptions,
    latch: BusyLatch,
}

impl LocationCapture {
    pub fn new(options: PositionOptions) -> Self {
        Self {
            options,
            latch: BusyLatch::new(),
        }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    pub fn is_busy(&self) -> bool {
        self.latch.is_busy()
    }

    /// Request a position and report progress through `presenter`
    pub async fn capture<P, S>(&self, provider: &P, presenter: &S) -> CaptureOutcome
    where
        P: GeolocationProvider + ?Sized,
        S: StatusPresenter + ?Sized,
    {
        let Some(_busy) = self.latch.try_acquire() else {
            debug!("Location request already pending, ignoring click");
            return CaptureOutcome::Ignored;
        };

        if !provider.is_supported() {
            let failure = GeolocationFailure::unsupported();
            presenter.show_status(StatusView::error(failure.message.clone()));
            return CaptureOutcome::Failed(failure);
        }

        presenter.show_status(StatusView::loading(LOCATING_MESSAGE));

        match provider.current_position(&self.options).await {
            Ok(raw) => {
                let coords = Coordinates::rounded(raw.latitude, raw.longitude);
                presenter.show_status(StatusView::success(CAPTURED_MESSAGE));
                CaptureOutcome::Captured(coords)
            }
            Err(failure) => {
                warn!("Geolocation failed: {:?}", failure.reason);
                presenter.show_status(StatusView::error(failure.message.clone()));
                CaptureOutcome::Failed(failure)
            }
        }
    }
}
