//! Transient feedback: the location status line and dashboard alerts

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of status line shown under the location button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// Font Awesome icon classes
    pub fn icon_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "fa-check-circle text-success",
            StatusKind::Error => "fa-exclamation-circle text-danger",
            StatusKind::Loading => "fa-spinner fa-spin text-info",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "text-success",
            StatusKind::Error => "text-danger",
            StatusKind::Loading => "text-info",
        }
    }
}

/// One rendering of the status region. Each new view replaces the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusView {
    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Loading)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Error)
    }
}

/// Renders status feedback into a fixed region of the page
pub trait StatusPresenter {
    /// Replace whatever the region currently shows
    fn show_status(&self, view: StatusView);

    /// Empty the region
    fn clear_status(&self);
}

/// Bootstrap alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }

    pub fn css_class(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.as_str())
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dismissible message at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        }
    }
}
