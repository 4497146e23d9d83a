//! Server payloads: the injected dashboard data and API responses

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A verified report as served to the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRecord {
    pub id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub original_text: Option<String>,
    /// ISO 8601, as produced by the server
    pub timestamp: Option<String>,
    /// Confidence in 0..=1
    pub trust_score: Option<f64>,
    pub predicted_label: Option<String>,
    pub confidence: Option<f64>,
}

impl ReportRecord {
    /// Category used for colour lookup and statistics
    pub fn category_or_unknown(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNKNOWN_CATEGORY,
        }
    }
}

/// Report count per category, in the order the server listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(Vec<(String, u64)>);

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count reports per category. Categories appear in first-seen order.
    pub fn from_reports(reports: &[ReportRecord]) -> Self {
        let mut counts = Self::new();
        for report in reports {
            counts.increment(report.category_or_unknown());
        }
        counts
    }

    pub fn increment(&mut self, category: &str) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.0.iter().map(|(_, count)| *count).collect()
    }
}

impl FromIterator<(String, u64)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = CategoryCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    entries.push((name, count));
                }
                Ok(CategoryCounts(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(CategoryCounts::default())
            }
        }

        deserializer.deserialize_any(CountsVisitor)
    }
}

/// Data the page injects for the initial render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardPayload {
    pub statistics: CategoryCounts,
    pub reports: Vec<ReportRecord>,
}

impl DashboardPayload {
    pub fn from_json(raw: &str) -> crate::CoreResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build a payload from a report list, deriving the statistics
    pub fn from_reports(reports: Vec<ReportRecord>) -> Self {
        Self {
            statistics: CategoryCounts::from_reports(&reports),
            reports,
        }
    }
}

/// Body returned by `/api/process`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: Option<String>,
}
