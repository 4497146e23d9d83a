//! In-place refresh of the report list from `/api/reports`

use crate::report::ReportRecord;
use crate::submission::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

/// Fetches the verified report list as raw JSON
#[async_trait(?Send)]
pub trait ReportFetcher {
    async fn fetch_reports(&self) -> Result<Value, TransportError>;
}

/// Interpret a `/api/reports` body. Anything but an array is ignored.
pub fn parse_report_list(body: Value) -> Option<Vec<ReportRecord>> {
    if !body.is_array() {
        debug!("Report list response is not an array, ignoring");
        return None;
    }

    match serde_json::from_value(body) {
        Ok(reports) => Some(reports),
        Err(err) => {
            error!("Error refreshing dashboard: {}", err);
            None
        }
    }
}

/// Fetch the current report list. `None` leaves the dashboard as it is.
pub async fn fetch_report_list<F>(fetcher: &F) -> Option<Vec<ReportRecord>>
where
    F: ReportFetcher + ?Sized,
{
    match fetcher.fetch_reports().await {
        Ok(body) => parse_report_list(body),
        Err(err) => {
            error!("Error refreshing dashboard: {}", err);
            None
        }
    }
}
