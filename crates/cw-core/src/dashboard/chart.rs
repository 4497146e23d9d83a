//! Category statistics chart model

use crate::report::CategoryCounts;

pub const EMPTY_STATE_MESSAGE: &str = "No data available";
pub const EMPTY_STATE_COLOR: &str = "#6c757d";
pub const EMPTY_STATE_FONT: &str = "16px Arial";

pub const PALETTE: [&str; 8] = [
    "#dc3545", "#fd7e14", "#28a745", "#007bff", "#6f42c1", "#e83e8c", "#20c997", "#ffc107",
];

pub const BORDER_WIDTH: u32 = 2;
pub const BORDER_COLOR: &str = "#2c3e50";
pub const LEGEND_LABEL_COLOR: &str = "#fff";
pub const LEGEND_PADDING: u32 = 20;

/// Data for a doughnut chart
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// One palette entry per label, as far as the palette reaches
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartModel {
    /// Nothing to plot, draw the empty-state text instead
    Empty,
    Doughnut(DoughnutData),
}

impl ChartModel {
    pub fn from_statistics(statistics: &CategoryCounts) -> Self {
        if statistics.is_empty() {
            return ChartModel::Empty;
        }

        let labels = statistics.labels();
        let colors = PALETTE.iter().copied().take(labels.len()).collect();
        ChartModel::Doughnut(DoughnutData {
            values: statistics.values(),
            labels,
            colors,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartModel::Empty)
    }
}
