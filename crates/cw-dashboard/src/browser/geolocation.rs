//! `navigator.geolocation` provider

use async_trait::async_trait;
use cw_core::geolocation::{
    Coordinates, FailureReason, GeolocationFailure, GeolocationProvider, GeolocationResult,
    PositionOptions,
};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserGeolocation;

impl BrowserGeolocation {
    fn navigator() -> Option<web_sys::Navigator> {
        web_sys::window().map(|w| w.navigator())
    }

    fn js_options(options: &PositionOptions) -> web_sys::PositionOptions {
        let object = js_sys::Object::new();
        let _ = Reflect::set(
            &object,
            &"enableHighAccuracy".into(),
            &options.enable_high_accuracy.into(),
        );
        let _ = Reflect::set(&object, &"timeout".into(), &options.timeout_ms.into());
        let _ = Reflect::set(&object, &"maximumAge".into(), &options.maximum_age_ms.into());
        object.unchecked_into()
    }
}

fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

#[async_trait(?Send)]
impl GeolocationProvider for BrowserGeolocation {
    fn is_supported(&self) -> bool {
        Self::navigator()
            .and_then(|nav| Reflect::has(&nav, &"geolocation".into()).ok())
            .unwrap_or(false)
    }

    async fn current_position(&self, options: &PositionOptions) -> GeolocationResult {
        let geolocation = Self::navigator()
            .and_then(|nav| nav.geolocation().ok())
            .ok_or_else(GeolocationFailure::unsupported)?;
        let js_options = Self::js_options(options);

        let request = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &js_options,
            ) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        match JsFuture::from(request).await {
            Ok(position) => {
                let latitude = number_at(&position, &["coords", "latitude"]);
                let longitude = number_at(&position, &["coords", "longitude"]);
                match (latitude, longitude) {
                    (Some(latitude), Some(longitude)) => Ok(Coordinates {
                        latitude,
                        longitude,
                    }),
                    _ => Err(GeolocationFailure::new(FailureReason::Unavailable)),
                }
            }
            Err(error) => {
                let code = number_at(&error, &["code"]).unwrap_or(0.0) as u16;
                Err(GeolocationFailure::from_code(code))
            }
        }
    }
}
