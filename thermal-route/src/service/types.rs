//! Routing service response DTOs.
//!
//! These types map directly to the JSON returned by the thermal routing
//! service. Every field is optional so that a missing array surfaces as a
//! precise conversion error instead of an opaque deserialization failure.

use serde::Deserialize;

/// Response body of the route endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// Route geometry as a GeoJSON line string.
    pub geojson: Option<LineGeometry>,

    /// Mean radiant temperature per edge, one entry per consecutive
    /// coordinate pair.
    pub mrt: Option<Vec<f64>>,

    /// Whole-route statistics.
    pub stats: Option<RouteStats>,
}

/// GeoJSON line geometry. Positions are `[longitude, latitude]`, optionally
/// followed by an elevation.
#[derive(Debug, Clone, Deserialize)]
pub struct LineGeometry {
    pub coordinates: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteStats {
    pub average_mrt: Option<f64>,
    /// Route length in metres.
    pub length: Option<f64>,
}
