//! Incident reports: the draft built from the form and the records the
//! dashboard payload carries.

mod payload;

pub use payload::{CategoryCounts, DashboardPayload, ReportRecord, SubmitResponse};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide an incident description.")]
    EmptyDescription,
}

/// Raw values of the report form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub description: String,
    pub latitude: String,
    pub longitude: String,
}

impl ReportForm {
    pub fn new(
        description: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

/// A validated report, ready for `/api/process`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    #[serde(rename = "report")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ReportDraft {
    /// Validate the form. An empty or unreadable coordinate becomes 0.
    pub fn from_form(form: &ReportForm) -> Result<Self, ValidationError> {
        let description = form.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        Ok(Self {
            description: description.to_string(),
            latitude: parse_coordinate(&form.latitude),
            longitude: parse_coordinate(&form.longitude),
        })
    }
}

/// Reads the longest numeric prefix of `raw`, so "6.5abc" gives 6.5.
/// Anything without a finite, non-zero prefix gives 0.
fn parse_coordinate(raw: &str) -> f64 {
    let text = raw.trim();
    let value = (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok());

    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}
