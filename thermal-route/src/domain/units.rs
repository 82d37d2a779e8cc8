//! Unit conversions and summary formatting.

use super::RouteSummary;

/// Measurement system used when presenting route statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Parse `metric` or `imperial`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * 3.28084
}

/// Render a summary as the two lines of the route stats card.
///
/// Returns `None` when the summary is not displayable.
pub fn format_summary(summary: &RouteSummary, units: UnitSystem) -> Option<[String; 2]> {
    if !summary.is_displayable() {
        return None;
    }
    let lines = match units {
        UnitSystem::Metric => [
            format!("Average MRT: {:.2}°C", summary.average_metric),
            format!("Length: {:.1} meters", summary.total_length),
        ],
        UnitSystem::Imperial => [
            format!(
                "Average MRT: {:.2}°F",
                celsius_to_fahrenheit(summary.average_metric)
            ),
            format!("Length: {:.1} feet", meters_to_feet(summary.total_length)),
        ],
    };
    Some(lines)
}
