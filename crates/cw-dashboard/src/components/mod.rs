//! Reusable components

mod alerts;
mod loading_modal;
mod location_status;
mod nav;
mod recent_alerts;
mod report_modal;

pub use alerts::AlertStack;
pub use loading_modal::LoadingModal;
pub use location_status::LocationStatus;
pub use nav::Nav;
pub use recent_alerts::RecentAlerts;
pub use report_modal::ReportModal;
