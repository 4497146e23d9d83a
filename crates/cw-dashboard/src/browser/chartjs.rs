//! Chart.js bindings and the canvas chart surface

use super::to_js;
use cw_core::dashboard::chart::{
    DoughnutData, BORDER_COLOR, BORDER_WIDTH, EMPTY_STATE_COLOR, EMPTY_STATE_FONT,
    LEGEND_LABEL_COLOR, LEGEND_PADDING,
};
use cw_core::dashboard::ChartSurface;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
extern "C" {
    /// Chart.js `Chart`
    type Chart;

    #[wasm_bindgen(catch, constructor)]
    fn new(context: &CanvasRenderingContext2d, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

/// The statistics canvas and the chart drawn on it, if any
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    chart: Option<Chart>,
}

impl CanvasChart {
    pub fn mount(canvas_id: &str) -> Result<Self, JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("#{canvas_id} not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        Ok(Self {
            canvas,
            context,
            chart: None,
        })
    }

    fn config(data: &DoughnutData) -> serde_json::Value {
        json!({
            "type": "doughnut",
            "data": {
                "labels": data.labels,
                "datasets": [{
                    "data": data.values,
                    "backgroundColor": data.colors,
                    "borderWidth": BORDER_WIDTH,
                    "borderColor": BORDER_COLOR,
                }],
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": {
                        "position": "bottom",
                        "labels": {
                            "color": LEGEND_LABEL_COLOR,
                            "padding": LEGEND_PADDING,
                        },
                    },
                },
            },
        })
    }
}

impl ChartSurface for CanvasChart {
    fn draw_empty_state(&mut self, message: &str) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        self.context.set_fill_style(&JsValue::from_str(EMPTY_STATE_COLOR));
        self.context.set_font(EMPTY_STATE_FONT);
        self.context.set_text_align("center");
        if let Err(err) = self.context.fill_text(message, width / 2.0, height / 2.0) {
            tracing::error!("Empty state text: {:?}", err);
        }
    }

    fn draw_doughnut(&mut self, data: &DoughnutData) {
        let chart = to_js(&Self::config(data)).and_then(|config| Chart::new(&self.context, &config));
        match chart {
            Ok(chart) => {
                self.chart = Some(chart);
                tracing::info!("Chart initialized with {} categories", data.labels.len());
            }
            Err(err) => tracing::error!("Chart creation failed: {:?}", err),
        }
    }

    fn clear(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.context.clear_rect(0.0, 0.0, width, height);
    }
}
