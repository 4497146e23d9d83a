//! Dashboard configuration

use crate::geolocation::PositionOptions;
use crate::{CoreError, CoreResult, LatLng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the dashboard picks up new data after an accepted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStrategy {
    /// Full page reload, the server renders a fresh payload
    #[default]
    Reload,
    /// Fetch the report list and replace the payload in place
    Refetch,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    /// Extra space around the markers when fitting bounds, as a ratio
    pub fit_padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Lagos, Nigeria
            center: LatLng::new(6.6018, 3.3515),
            zoom: 10,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            fit_padding: 0.1,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Report processing endpoint
    pub process_endpoint: String,
    /// Verified report list endpoint
    pub reports_endpoint: String,
    pub map: MapConfig,
    pub geolocation: PositionOptions,
    /// Delay between an accepted report and the refresh
    pub reload_delay_ms: u64,
    /// Lifetime of a dashboard alert before it is removed
    pub alert_ttl_ms: u64,
    pub refresh: RefreshStrategy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            process_endpoint: "/api/process".to_string(),
            reports_endpoint: "/api/reports".to_string(),
            map: MapConfig::default(),
            geolocation: PositionOptions::default(),
            reload_delay_ms: 2_000,
            alert_ttl_ms: 5_000,
            refresh: RefreshStrategy::Reload,
        }
    }
}

impl DashboardConfig {
    /// Parse an override document. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.process_endpoint.trim().is_empty() {
            return Err(CoreError::Config("process_endpoint is empty".to_string()));
        }
        if self.reports_endpoint.trim().is_empty() {
            return Err(CoreError::Config("reports_endpoint is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.map.fit_padding) {
            return Err(CoreError::Config(format!(
                "fit_padding must be within 0..=1, got {}",
                self.map.fit_padding
            )));
        }
        Ok(())
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn alert_ttl(&self) -> Duration {
        Duration::from_millis(self.alert_ttl_ms)
    }
}
