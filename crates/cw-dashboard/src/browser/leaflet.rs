//! Leaflet bindings and the map surface built on them

use super::to_js;
use cw_core::dashboard::{MapSurface, MarkerSpec};
use cw_core::LatLng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(element_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Map;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &Map, bounds: &LatLngBounds) -> Map;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Map, layer: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    fn remove(this: &Map) -> Map;

    /// `L.TileLayer`
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    /// `L.CircleMarker`
    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(position: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &CircleMarker, content: &str) -> CircleMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &CircleMarker, map: &Map) -> CircleMarker;

    /// `L.LatLngBounds`
    type LatLngBounds;

    #[wasm_bindgen(js_namespace = L, js_name = latLngBounds)]
    fn lat_lng_bounds(points: &JsValue) -> LatLngBounds;

    #[wasm_bindgen(method)]
    fn pad(this: &LatLngBounds, ratio: f64) -> LatLngBounds;
}

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleOptions<'a> {
    color: &'a str,
    fill_color: &'a str,
    fill_opacity: f64,
    radius: f64,
    weight: f64,
}

fn point(position: LatLng) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&position.latitude.into());
    pair.push(&position.longitude.into());
    pair.into()
}

/// A Leaflet map mounted on an element of the page
pub struct LeafletSurface {
    map: Map,
}

impl LeafletSurface {
    pub fn mount(element_id: &str) -> Result<Self, JsValue> {
        Ok(Self {
            map: create_map(element_id)?,
        })
    }
}

impl MapSurface for LeafletSurface {
    type Marker = CircleMarker;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map.set_view(&point(center), zoom);
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str) {
        match to_js(&TileOptions { attribution }) {
            Ok(options) => {
                tile_layer(url, &options).add_to(&self.map);
            }
            Err(err) => tracing::error!("Tile layer options: {:?}", err),
        }
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> CircleMarker {
        let options = to_js(&CircleOptions {
            color: spec.style.color,
            fill_color: spec.style.fill_color,
            fill_opacity: spec.style.fill_opacity,
            radius: spec.style.radius,
            weight: spec.style.weight,
        })
        .unwrap_or(JsValue::UNDEFINED);

        let marker = circle_marker(&point(spec.position), &options);
        marker.bind_popup(&spec.popup.to_html());
        marker.add_to(&self.map);
        marker
    }

    fn remove_marker(&mut self, marker: CircleMarker) {
        self.map.remove_layer(&marker);
    }

    fn fit_bounds(&mut self, points: &[LatLng], padding: f64) {
        let array: js_sys::Array = points.iter().map(|p| point(*p)).collect();
        let bounds = lat_lng_bounds(&array).pad(padding);
        self.map.fit_bounds(&bounds);
    }

    fn destroy(&mut self) {
        self.map.remove();
    }
}
