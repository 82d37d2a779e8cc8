//! Route request and result types.

use std::fmt;

use super::{Coordinate, TargetTime, Waypoint};

/// Identity of an issued route request.
///
/// Sequence ids are assigned by the staleness guard and strictly increase
/// for the lifetime of a controller.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(pub u64);

impl fmt::Debug for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable description of one route fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    start: Waypoint,
    end: Waypoint,
    time: TargetTime,
    sequence_id: SequenceId,
}

impl RouteRequest {
    pub fn new(start: Waypoint, end: Waypoint, time: TargetTime, sequence_id: SequenceId) -> Self {
        Self {
            start,
            end,
            time,
            sequence_id,
        }
    }

    pub fn start(&self) -> Waypoint {
        self.start
    }

    pub fn end(&self) -> Waypoint {
        self.end
    }

    pub fn time(&self) -> TargetTime {
        self.time
    }

    pub fn sequence_id(&self) -> SequenceId {
        self.sequence_id
    }

    /// Query parameters understood by the routing service.
    pub fn query_params(&self) -> [(&'static str, String); 5] {
        [
            ("startLatitude", self.start.latitude().to_string()),
            ("startLongitude", self.start.longitude().to_string()),
            ("endLatitude", self.end.latitude().to_string()),
            ("endLongitude", self.end.longitude().to_string()),
            ("dateTimeUTC", self.time.to_param()),
        ]
    }
}

/// One edge of a route annotated with its thermal metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSegment {
    pub path: [Coordinate; 2],
    /// Mean radiant temperature along the edge, in degrees Celsius.
    pub metric: f64,
}

/// Aggregate statistics for a whole route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Mean radiant temperature over the route, in degrees Celsius.
    pub average_metric: f64,
    /// Route length in metres.
    pub total_length: f64,
}

impl RouteSummary {
    /// Whether the summary carries real values worth showing.
    ///
    /// The routing service reports zeros when it could not compute stats.
    pub fn is_displayable(&self) -> bool {
        self.average_metric != 0.0 && self.total_length != 0.0
    }
}

/// A parsed route ready to be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub segments: Vec<RouteSegment>,
    pub summary: RouteSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RouteRequest {
        let start = Waypoint::new(-111.9346, 33.419).unwrap();
        let end = Waypoint::new(-111.93, 33.42).unwrap();
        let time = TargetTime::parse_param("2026-10-19-1400").unwrap();
        RouteRequest::new(start, end, time, SequenceId(7))
    }

    #[test]
    fn query_params_use_service_names() {
        let params = request().query_params();
        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            [
                "startLatitude",
                "startLongitude",
                "endLatitude",
                "endLongitude",
                "dateTimeUTC"
            ]
        );
        assert_eq!(params[0].1, "33.419");
        assert_eq!(params[1].1, "-111.9346");
        assert_eq!(params[4].1, "2026-10-19-1400");
    }

    #[test]
    fn sequence_id_display() {
        assert_eq!(request().sequence_id().to_string(), "#7");
        assert!(SequenceId(1) < SequenceId(2));
    }

    #[test]
    fn summary_displayable_only_with_values() {
        let full = RouteSummary {
            average_metric: 41.2,
            total_length: 512.0,
        };
        assert!(full.is_displayable());

        let no_length = RouteSummary {
            total_length: 0.0,
            ..full
        };
        assert!(!no_length.is_displayable());

        let no_metric = RouteSummary {
            average_metric: 0.0,
            ..full
        };
        assert!(!no_metric.is_displayable());
    }
}
