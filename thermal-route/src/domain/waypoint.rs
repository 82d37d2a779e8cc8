//! Coordinate and waypoint types.

use std::fmt;

/// Error returned when building a waypoint from an invalid coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid waypoint: {reason}")]
pub struct InvalidWaypoint {
    reason: &'static str,
}

/// A longitude/latitude pair in WGS84 degrees.
///
/// This is the raw geometry type used for route paths. It carries no
/// validation; use [`Waypoint`] for user-selected points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A route start or end point.
///
/// A waypoint is always a complete, finite coordinate pair within the valid
/// latitude/longitude ranges. Absence is expressed as `Option<Waypoint>`,
/// never as a partially filled value.
///
/// # Examples
///
/// ```
/// use thermal_route::domain::Waypoint;
///
/// let hayden = Waypoint::new(-111.9346, 33.419).unwrap();
/// assert_eq!(hayden.latitude(), 33.419);
///
/// // Out of range
/// assert!(Waypoint::new(-111.9, 95.0).is_err());
/// // Not a number
/// assert!(Waypoint::new(f64::NAN, 33.4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint(Coordinate);

impl Waypoint {
    /// Build a waypoint from longitude and latitude in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidWaypoint> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(InvalidWaypoint {
                reason: "coordinates must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidWaypoint {
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidWaypoint {
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(Self(Coordinate::new(longitude, latitude)))
    }

    pub fn longitude(&self) -> f64 {
        self.0.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.0.latitude
    }

    /// Returns the underlying coordinate.
    pub fn coordinate(&self) -> Coordinate {
        self.0
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
