//! Dashboard rendering
//!
//! The [`DashboardController`] owns the map, the chart and the live marker
//! list. Drawing itself is delegated to a [`MapSurface`] and a
//! [`ChartSurface`]; on the page those are Leaflet and Chart.js.

pub mod chart;
pub mod markers;
pub mod refresh;

pub use chart::{ChartModel, DoughnutData};
pub use markers::{MarkerSpec, MarkerStyle, PopupContent};
pub use refresh::{fetch_report_list, ReportFetcher};

use crate::config::MapConfig;
use crate::report::{DashboardPayload, ReportRecord};
use crate::{CoreError, CoreResult, LatLng};
use tracing::info;

/// Reports listed in the recent alerts panel
pub const RECENT_ALERT_LIMIT: usize = 10;

/// A map that can show circle markers
pub trait MapSurface {
    /// Handle to a marker placed on the map
    type Marker;

    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn add_tile_layer(&mut self, url: &str, attribution: &str);

    fn add_marker(&mut self, spec: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Zoom to show every point, padded by `padding` of the span
    fn fit_bounds(&mut self, points: &[LatLng], padding: f64);

    /// Tear the map down
    fn destroy(&mut self) {}
}

/// Where the statistics chart is drawn
pub trait ChartSurface {
    fn draw_empty_state(&mut self, message: &str);

    fn draw_doughnut(&mut self, data: &DoughnutData);

    /// Remove whatever is currently drawn
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Ready,
    Disposed,
}

pub struct DashboardController<M: MapSurface, C: ChartSurface> {
    config: MapConfig,
    map: M,
    chart: C,
    markers: Vec<M::Marker>,
    payload: DashboardPayload,
    lifecycle: Lifecycle,
}

impl<M: MapSurface, C: ChartSurface> DashboardController<M, C> {
    pub fn new(map: M, chart: C, config: MapConfig) -> Self {
        Self {
            config,
            map,
            chart,
            markers: Vec::new(),
            payload: DashboardPayload::default(),
            lifecycle: Lifecycle::Created,
        }
    }

    /// Centre the map and add the tile layer. Calling it again is a no-op.
    pub fn initialize(&mut self) -> CoreResult<()> {
        match self.lifecycle {
            Lifecycle::Ready => return Ok(()),
            Lifecycle::Disposed => return Err(CoreError::Disposed),
            Lifecycle::Created => {}
        }

        self.map.set_view(self.config.center, self.config.zoom);
        self.map
            .add_tile_layer(&self.config.tile_url, &self.config.attribution);
        self.lifecycle = Lifecycle::Ready;
        info!("Map initialized");
        Ok(())
    }

    /// Replace everything on screen with `payload`. Returns the number of
    /// markers placed.
    pub fn load_data(&mut self, payload: DashboardPayload) -> CoreResult<usize> {
        self.ensure_ready()?;

        self.render_chart(&ChartModel::from_statistics(&payload.statistics));
        self.clear_markers();

        let specs: Vec<MarkerSpec> = payload
            .reports
            .iter()
            .filter_map(MarkerSpec::from_record)
            .collect();
        for spec in &specs {
            let marker = self.map.add_marker(spec);
            self.markers.push(marker);
        }

        if !specs.is_empty() {
            let points: Vec<LatLng> = specs.iter().map(|s| s.position).collect();
            self.map.fit_bounds(&points, self.config.fit_padding);
        }

        self.payload = payload;
        info!("Loaded {} crime markers", self.markers.len());
        Ok(self.markers.len())
    }

    /// Swap in a fresh report list, recomputing the statistics from it
    pub fn replace_reports(&mut self, reports: Vec<ReportRecord>) -> CoreResult<usize> {
        self.load_data(DashboardPayload::from_reports(reports))
    }

    /// Release the markers, the chart and the map
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.clear_markers();
        self.chart.clear();
        self.map.destroy();
        self.payload = DashboardPayload::default();
        self.lifecycle = Lifecycle::Disposed;
    }

    pub fn payload(&self) -> &DashboardPayload {
        &self.payload
    }

    /// Newest reports first, as the server orders them
    pub fn recent_reports(&self) -> &[ReportRecord] {
        let end = self.payload.reports.len().min(RECENT_ALERT_LIMIT);
        &self.payload.reports[..end]
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    fn ensure_ready(&self) -> CoreResult<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Created => Err(CoreError::NotInitialized),
            Lifecycle::Disposed => Err(CoreError::Disposed),
        }
    }

    fn render_chart(&mut self, model: &ChartModel) {
        self.chart.clear();
        match model {
            ChartModel::Empty => self.chart.draw_empty_state(chart::EMPTY_STATE_MESSAGE),
            ChartModel::Doughnut(data) => self.chart.draw_doughnut(data),
        }
    }

    fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.map.remove_marker(marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CategoryCounts;

    #[derive(Default)]
    struct FakeMap {
        view: Option<(LatLng, u8)>,
        tiles: Vec<String>,
        next_id: usize,
        live: Vec<usize>,
        fitted: Vec<(usize, f64)>,
        destroyed: bool,
    }

    impl MapSurface for FakeMap {
        type Marker = usize;

        fn set_view(&mut self, center: LatLng, zoom: u8) {
            self.view = Some((center, zoom));
        }

        fn add_tile_layer(&mut self, url: &str, _attribution: &str) {
            self.tiles.push(url.to_string());
        }

        fn add_marker(&mut self, _spec: &MarkerSpec) -> usize {
            self.next_id += 1;
            self.live.push(self.next_id);
            self.next_id
        }

        fn remove_marker(&mut self, marker: usize) {
            self.live.retain(|id| *id != marker);
        }

        fn fit_bounds(&mut self, points: &[LatLng], padding: f64) {
            self.fitted.push((points.len(), padding));
        }

        fn destroy(&mut self) {
            self.destroyed = true;
        }
    }

    #[derive(Default)]
    struct FakeChart {
        empty_messages: Vec<String>,
        charts_built: usize,
        cleared: usize,
    }

    impl ChartSurface for FakeChart {
        fn draw_empty_state(&mut self, message: &str) {
            self.empty_messages.push(message.to_string());
        }

        fn draw_doughnut(&mut self, _data: &DoughnutData) {
            self.charts_built += 1;
        }

        fn clear(&mut self) {
            self.cleared += 1;
        }
    }

    fn controller() -> DashboardController<FakeMap, FakeChart> {
        let mut controller =
            DashboardController::new(FakeMap::default(), FakeChart::default(), MapConfig::default());
        controller.initialize().unwrap();
        controller
    }

    fn report(lat: Option<f64>, lng: Option<f64>, category: &str) -> ReportRecord {
        ReportRecord {
            latitude: lat,
            longitude: lng,
            category: Some(category.to_string()),
            trust_score: Some(0.9),
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_sets_default_view() {
        let controller = controller();
        let (center, zoom) = controller.map().view.unwrap();
        assert_eq!(center, LatLng::new(6.6018, 3.3515));
        assert_eq!(zoom, 10);
        assert_eq!(controller.map().tiles.len(), 1);
        assert!(controller.is_ready());
    }

    #[test]
    fn test_load_requires_initialize() {
        let mut controller =
            DashboardController::new(FakeMap::default(), FakeChart::default(), MapConfig::default());
        assert!(matches!(
            controller.load_data(DashboardPayload::default()),
            Err(CoreError::NotInitialized)
        ));
    }

    #[test]
    fn test_empty_statistics_draw_empty_state() {
        let mut controller = controller();
        controller.load_data(DashboardPayload::default()).unwrap();

        assert_eq!(controller.chart().empty_messages, vec!["No data available"]);
        assert_eq!(controller.chart().charts_built, 0);
    }

    #[test]
    fn test_only_located_reports_get_markers() {
        let mut controller = controller();
        let payload = DashboardPayload {
            statistics: CategoryCounts::new(),
            reports: vec![
                report(Some(6.5), Some(3.4), "Theft"),
                report(None, Some(3.4), "Theft"),
                report(Some(6.45), Some(3.39), "Robbery"),
                report(Some(6.5), None, "Fraud"),
                report(None, None, "Assault"),
            ],
        };

        let placed = controller.load_data(payload).unwrap();

        assert_eq!(placed, 2);
        assert_eq!(controller.map().live.len(), 2);
        assert_eq!(controller.map().fitted, vec![(2, 0.1)]);
    }

    #[test]
    fn test_no_fit_without_markers() {
        let mut controller = controller();
        controller
            .load_data(DashboardPayload::from_reports(vec![report(None, None, "Theft")]))
            .unwrap();
        assert!(controller.map().fitted.is_empty());
        assert_eq!(controller.chart().charts_built, 1);
    }

    #[test]
    fn test_reload_replaces_markers() {
        let mut controller = controller();
        controller
            .load_data(DashboardPayload::from_reports(vec![
                report(Some(6.5), Some(3.4), "Theft"),
                report(Some(6.6), Some(3.3), "Theft"),
            ]))
            .unwrap();

        let placed = controller
            .replace_reports(vec![report(Some(6.7), Some(3.2), "Fraud")])
            .unwrap();

        assert_eq!(placed, 1);
        assert_eq!(controller.map().live, vec![3]);
        assert_eq!(controller.payload().statistics.labels(), vec!["Fraud"]);
    }

    #[test]
    fn test_reload_with_no_reports_clears_markers() {
        let mut controller = controller();
        controller
            .load_data(DashboardPayload::from_reports(vec![report(
                Some(6.5),
                Some(3.4),
                "Theft",
            )]))
            .unwrap();

        controller.replace_reports(Vec::new()).unwrap();

        assert!(controller.map().live.is_empty());
        assert_eq!(controller.chart().empty_messages.len(), 1);
    }

    #[test]
    fn test_recent_reports_are_capped() {
        let mut controller = controller();
        let reports = (0..15).map(|_| report(None, None, "Theft")).collect();
        controller.replace_reports(reports).unwrap();
        assert_eq!(controller.recent_reports().len(), RECENT_ALERT_LIMIT);
    }

    #[test]
    fn test_dispose() {
        let mut controller = controller();
        controller
            .load_data(DashboardPayload::from_reports(vec![report(
                Some(6.5),
                Some(3.4),
                "Theft",
            )]))
            .unwrap();

        controller.dispose();

        assert!(controller.map().live.is_empty());
        assert!(controller.map().destroyed);
        assert_eq!(controller.marker_count(), 0);
        assert!(matches!(
            controller.load_data(DashboardPayload::default()),
            Err(CoreError::Disposed)
        ));
        assert!(matches!(controller.initialize(), Err(CoreError::Disposed)));
    }
}
