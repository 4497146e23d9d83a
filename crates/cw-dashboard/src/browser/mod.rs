//! Browser adapters for the `cw-core` seams

pub mod chartjs;
pub mod geolocation;
pub mod http;
pub mod leaflet;

use cw_core::{DashboardConfig, DashboardPayload};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub use chartjs::CanvasChart;
pub use geolocation::BrowserGeolocation;
pub use http::HttpClient;
pub use leaflet::LeafletSurface;

/// Global the page template fills with the dashboard data
const PAYLOAD_GLOBAL: &str = "crimeData";
/// Optional global with configuration overrides
const CONFIG_GLOBAL: &str = "crimeWatchConfig";

/// Read a global object set by the page as JSON text
fn read_global(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

pub fn injected_payload() -> DashboardPayload {
    let Some(raw) = read_global(PAYLOAD_GLOBAL) else {
        tracing::warn!("window.{} is not set, starting empty", PAYLOAD_GLOBAL);
        return DashboardPayload::default();
    };

    DashboardPayload::from_json(&raw).unwrap_or_else(|e| {
        tracing::error!("Invalid dashboard payload: {}", e);
        DashboardPayload::default()
    })
}

pub fn injected_config() -> DashboardConfig {
    let Some(raw) = read_global(CONFIG_GLOBAL) else {
        return DashboardConfig::default();
    };

    DashboardConfig::from_json(&raw).unwrap_or_else(|e| {
        tracing::error!("Ignoring invalid configuration override: {}", e);
        DashboardConfig::default()
    })
}

/// Convert a serializable value into a plain JS object
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

pub fn reload_page() {
    let result = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|window| window.location().reload());
    if let Err(err) = result {
        tracing::error!("Page reload failed: {:?}", err);
    }
}

/// Blocking `window.alert`
pub fn prompt(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
