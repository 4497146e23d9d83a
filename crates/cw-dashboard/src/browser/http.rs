//! Dashboard API client over `fetch`

use async_trait::async_trait;
use cw_core::dashboard::ReportFetcher;
use cw_core::report::{ReportDraft, SubmitResponse};
use cw_core::submission::{ReportTransport, TransportError};
use cw_core::DashboardConfig;
use gloo_net::http::{Request, Response};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpClient {
    process_endpoint: String,
    reports_endpoint: String,
}

impl HttpClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            process_endpoint: config.process_endpoint.clone(),
            reports_endpoint: config.reports_endpoint.clone(),
        }
    }
}

fn check_status(response: Response) -> Result<Response, TransportError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(TransportError::Status(response.status()))
    }
}

#[async_trait(?Send)]
impl ReportTransport for HttpClient {
    async fn submit_report(&self, draft: &ReportDraft) -> Result<SubmitResponse, TransportError> {
        let request = Request::post(&self.process_endpoint)
            .json(draft)
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(response)?
            .json::<SubmitResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ReportFetcher for HttpClient {
    async fn fetch_reports(&self) -> Result<Value, TransportError> {
        let response = Request::get(&self.reports_endpoint)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(response)?
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
