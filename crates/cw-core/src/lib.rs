//! Crime Watch Dashboard Core
//!
//! This crate holds everything the dashboard does that does not need a
//! browser: the report submission workflow, geolocation capture and
//! classification, status and alert models, and the projection of the
//! dashboard payload onto map markers and chart data. Browser capabilities
//! are reached through the traits defined here.

pub mod busy;
pub mod config;
pub mod dashboard;
pub mod geolocation;
pub mod report;
pub mod status;
pub mod submission;

use thiserror::Error;

pub use config::{DashboardConfig, MapConfig, RefreshStrategy};
pub use dashboard::{ChartSurface, DashboardController, MapSurface};
pub use geolocation::{Coordinates, FailureReason, GeolocationFailure, GeolocationProvider};
pub use report::{CategoryCounts, DashboardPayload, ReportDraft, ReportForm, ReportRecord};
pub use status::{Alert, AlertLevel, StatusKind, StatusPresenter, StatusView};
pub use submission::{ReportSubmission, ReportTransport, SubmissionOutcome, SubmissionUi};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dashboard has been disposed")]
    Disposed,

    #[error("Dashboard is not initialized")]
    NotInitialized,
}

pub type CoreResult<T> = Result<T, CoreError>;

/// A point on the map in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(CoreError::Disposed.to_string(), "Dashboard has been disposed");
        assert_eq!(
            CoreError::Config("bad zoom".into()).to_string(),
            "Configuration error: bad zoom"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CoreError = serde_json::from_str::<LatLng>("{").unwrap_err().into();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
