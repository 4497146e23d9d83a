//! Map marker projection of report records

use crate::report::ReportRecord;
use crate::LatLng;
use chrono::{DateTime, NaiveDateTime};

pub const FALLBACK_COLOR: &str = "#6c757d";
pub const DESCRIPTION_LIMIT: usize = 100;
pub const NO_DESCRIPTION: &str = "No description";

/// Marker colour for a crime category
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Robbery" => "#dc3545",
        "Theft" => "#fd7e14",
        "Assault" => "#e83e8c",
        "Vandalism" => "#6f42c1",
        "Fraud" => "#20c997",
        "Burglary" => "#ffc107",
        _ => FALLBACK_COLOR,
    }
}

/// Circle marker styling
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub radius: f64,
    pub weight: f64,
}

impl MarkerStyle {
    pub fn for_category(category: &str) -> Self {
        let color = category_color(category);
        Self {
            color,
            fill_color: color,
            fill_opacity: 0.8,
            radius: 8.0,
            weight: 2.0,
        }
    }
}

/// Text shown when a marker is clicked
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub category: String,
    pub description: String,
    pub timestamp: String,
    pub trust_percent: i64,
}

impl PopupContent {
    pub fn from_record(record: &ReportRecord) -> Self {
        Self {
            category: record.category_or_unknown().to_string(),
            description: record
                .original_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(truncate_description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            timestamp: record
                .timestamp
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            trust_percent: trust_percent(record.trust_score.unwrap_or(0.0)),
        }
    }

    /// Popup markup with every value escaped
    pub fn to_html(&self) -> String {
        format!(
            r#"<div>
    <h6><strong>{}</strong></h6>
    <p class="mb-1">{}</p>
    <small class="text-muted">
        <i class="fas fa-clock"></i> {}<br>
        <i class="fas fa-shield-alt"></i> Trust: {}%
    </small>
</div>"#,
            escape_html(&self.category),
            escape_html(&self.description),
            escape_html(&self.timestamp),
            self.trust_percent,
        )
    }
}

/// Everything needed to place one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: PopupContent,
}

impl MarkerSpec {
    /// `None` unless the record has both coordinates
    pub fn from_record(record: &ReportRecord) -> Option<Self> {
        let latitude = present(record.latitude)?;
        let longitude = present(record.longitude)?;
        Some(Self {
            position: LatLng::new(latitude, longitude),
            style: MarkerStyle::for_category(record.category_or_unknown()),
            popup: PopupContent::from_record(record),
        })
    }
}

/// Zero counts as missing: reports sent without a location carry 0, 0.
fn present(coordinate: Option<f64>) -> Option<f64> {
    coordinate.filter(|v| v.is_finite() && *v != 0.0)
}

/// Cut to 100 characters and mark the cut with an ellipsis
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Trust score as a whole percentage
pub fn trust_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Render an ISO 8601 timestamp as `1/15/2024, 10:30:00 AM`.
/// Unreadable input is shown as is.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"));

    match parsed {
        Ok(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: Option<f64>, lng: Option<f64>) -> ReportRecord {
        ReportRecord {
            latitude: lat,
            longitude: lng,
            category: Some("Theft".into()),
            original_text: Some("Phone snatched near the bus stop".into()),
            timestamp: Some("2024-01-15T10:30:00".into()),
            trust_score: Some(0.856),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(category_color("Robbery"), "#dc3545");
        assert_eq!(category_color("Burglary"), "#ffc107");
        assert_eq!(category_color("Crime Report"), FALLBACK_COLOR);
        assert_eq!(category_color("theft"), FALLBACK_COLOR);
    }

    #[test]
    fn test_marker_requires_both_coordinates() {
        assert!(MarkerSpec::from_record(&record(Some(6.5), Some(3.4))).is_some());
        assert!(MarkerSpec::from_record(&record(None, Some(3.4))).is_none());
        assert!(MarkerSpec::from_record(&record(Some(6.5), None)).is_none());
        assert!(MarkerSpec::from_record(&record(Some(0.0), Some(3.4))).is_none());
        assert!(MarkerSpec::from_record(&record(Some(f64::NAN), Some(3.4))).is_none());
    }

    #[test]
    fn test_marker_style() {
        let spec = MarkerSpec::from_record(&record(Some(6.5), Some(3.4))).unwrap();
        assert_eq!(spec.position, LatLng::new(6.5, 3.4));
        assert_eq!(spec.style.color, "#fd7e14");
        assert_eq!(spec.style.fill_color, "#fd7e14");
        assert_eq!(spec.style.radius, 8.0);
    }

    #[test]
    fn test_popup_content() {
        let popup = PopupContent::from_record(&record(Some(6.5), Some(3.4)));
        assert_eq!(popup.category, "Theft");
        assert_eq!(popup.timestamp, "1/15/2024, 10:30:00 AM");
        assert_eq!(popup.trust_percent, 86);

        let html = popup.to_html();
        assert!(html.contains("<strong>Theft</strong>"));
        assert!(html.contains("Trust: 86%"));
    }

    #[test]
    fn test_popup_fallbacks() {
        let popup = PopupContent::from_record(&ReportRecord::default());
        assert_eq!(popup.category, "Unknown");
        assert_eq!(popup.description, NO_DESCRIPTION);
        assert_eq!(popup.trust_percent, 0);
    }

    #[test]
    fn test_popup_escapes_markup() {
        let mut rec = record(Some(6.5), Some(3.4));
        rec.original_text = Some("<script>alert('x')</script>".into());
        let html = PopupContent::from_record(&rec).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_truncate_description() {
        let exact = "a".repeat(100);
        assert_eq!(truncate_description(&exact), exact);

        let long = "b".repeat(101);
        assert_eq!(truncate_description(&long), format!("{}...", "b".repeat(100)));

        let wide = "é".repeat(150);
        assert_eq!(truncate_description(&wide).chars().count(), 103);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-05T18:04:09.123456"), "3/5/2024, 6:04:09 PM");
        assert_eq!(format_timestamp("2024-03-05T00:00:00+01:00"), "3/5/2024, 12:00:00 AM");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_trust_percent_rounding() {
        assert_eq!(trust_percent(0.5), 50);
        assert_eq!(trust_percent(0.805), 81);
        assert_eq!(trust_percent(1.0), 100);
    }
}
