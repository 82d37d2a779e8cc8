//! Conversion from routing service DTOs to domain types.
//!
//! The service returns the route as an ordered coordinate list plus a
//! parallel list of per-edge metrics. Segment `i` joins coordinates `i` and
//! `i + 1` and carries metric `i`, so a well-formed response has exactly one
//! metric fewer than it has coordinates.

use crate::domain::{Coordinate, RouteResult, RouteSegment, RouteSummary};

use super::types::RouteResponse;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A position is not a `[lon, lat]` pair
    #[error("coordinate {0} is not a [lon, lat] position")]
    InvalidCoordinate(usize),

    /// Metric array does not line up with the coordinate list
    #[error("expected {expected} metrics for {coordinates} coordinates, got {metrics}")]
    LengthMismatch {
        coordinates: usize,
        expected: usize,
        metrics: usize,
    },
}

/// Convert a route response to domain types.
pub fn convert_route(response: &RouteResponse) -> Result<RouteResult, ConversionError> {
    let raw = response
        .geojson
        .as_ref()
        .ok_or(ConversionError::MissingField("geojson"))?
        .coordinates
        .as_deref()
        .ok_or(ConversionError::MissingField("geojson.coordinates"))?;
    let metrics = response
        .mrt
        .as_deref()
        .ok_or(ConversionError::MissingField("mrt"))?;
    let stats = response
        .stats
        .as_ref()
        .ok_or(ConversionError::MissingField("stats"))?;

    let coordinates = raw
        .iter()
        .enumerate()
        .map(|(idx, position)| convert_position(idx, position))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = RouteSummary {
        average_metric: stats
            .average_mrt
            .ok_or(ConversionError::MissingField("stats.average_mrt"))?,
        total_length: stats
            .length
            .ok_or(ConversionError::MissingField("stats.length"))?,
    };

    Ok(RouteResult {
        segments: build_segments(&coordinates, metrics)?,
        summary,
    })
}

/// Pair consecutive coordinates into metric-annotated segments.
///
/// A single coordinate (or none) yields an empty route.
pub fn build_segments(
    coordinates: &[Coordinate],
    metrics: &[f64],
) -> Result<Vec<RouteSegment>, ConversionError> {
    let expected = coordinates.len().saturating_sub(1);
    if metrics.len() != expected {
        return Err(ConversionError::LengthMismatch {
            coordinates: coordinates.len(),
            expected,
            metrics: metrics.len(),
        });
    }

    Ok(coordinates
        .windows(2)
        .zip(metrics)
        .map(|(pair, &metric)| RouteSegment {
            path: [pair[0], pair[1]],
            metric,
        })
        .collect())
}

fn convert_position(idx: usize, position: &[f64]) -> Result<Coordinate, ConversionError> {
    match position {
        [lon, lat] | [lon, lat, _] => Ok(Coordinate::new(*lon, *lat)),
        _ => Err(ConversionError::InvalidCoordinate(idx)),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coords_and_metrics() -> impl Strategy<Value = (Vec<Coordinate>, Vec<f64>)> {
        (1usize..40).prop_flat_map(|n| {
            (
                prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), n),
                prop::collection::vec(0.0f64..80.0, n - 1),
            )
                .prop_map(|(pairs, metrics)| {
                    let coords = pairs
                        .into_iter()
                        .map(|(lon, lat)| Coordinate::new(lon, lat))
                        .collect();
                    (coords, metrics)
                })
        })
    }

    proptest! {
        /// Segments chain end-to-start and keep metric order
        #[test]
        fn segments_chain((coords, metrics) in coords_and_metrics()) {
            let segments = build_segments(&coords, &metrics).unwrap();
            prop_assert_eq!(segments.len(), coords.len() - 1);
            for (i, seg) in segments.iter().enumerate() {
                prop_assert_eq!(seg.path[0], coords[i]);
                prop_assert_eq!(seg.path[1], coords[i + 1]);
                prop_assert_eq!(seg.metric, metrics[i]);
            }
        }

        /// Any metric count other than coordinates - 1 is rejected
        #[test]
        fn wrong_metric_count_rejected((coords, mut metrics) in coords_and_metrics(), extra in 1usize..4) {
            metrics.extend(std::iter::repeat_n(1.0, extra));
            let is_mismatch = matches!(
                build_segments(&coords, &metrics),
                Err(ConversionError::LengthMismatch { .. })
            );
            prop_assert!(is_mismatch);
        }
    }
}
