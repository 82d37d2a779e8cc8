//! Fixture route provider for running without the routing service.
//!
//! Loads a recorded route response from a JSON file and serves it as if it
//! were a live answer.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{RouteRequest, RouteResult};

use super::convert::convert_route;
use super::error::RouteError;
use super::provider::RouteProvider;
use super::types::RouteResponse;

/// Provider that answers every request with the same recorded route.
///
/// Useful for demos and development without access to the routing service.
#[derive(Clone)]
pub struct FixtureRouteProvider {
    route: Arc<RwLock<RouteResult>>,
}

impl FixtureRouteProvider {
    /// Load a recorded response from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RouteError::Malformed {
            message: format!("failed to read fixture {}: {e}", path.display()),
            body: None,
        })?;
        Self::from_json(&json)
    }

    /// Parse a recorded response from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RouteError> {
        Ok(Self {
            route: Arc::new(RwLock::new(parse_fixture(json)?)),
        })
    }

    /// Reload the fixture from disk (useful for development).
    ///
    /// On failure the previously loaded route is kept.
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), RouteError> {
        let fresh = Self::from_file(path)?;
        let route = fresh.route.read().await.clone();
        *self.route.write().await = route;
        Ok(())
    }
}

impl RouteProvider for FixtureRouteProvider {
    /// Request parameters are ignored - fixture data is static.
    async fn fetch(&self, _request: &RouteRequest) -> Result<RouteResult, RouteError> {
        Ok(self.route.read().await.clone())
    }
}

fn parse_fixture(json: &str) -> Result<RouteResult, RouteError> {
    let payload: RouteResponse = serde_json::from_str(json).map_err(|e| RouteError::Malformed {
        message: format!("failed to parse fixture: {e}"),
        body: None,
    })?;
    Ok(convert_route(&payload)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::{SequenceId, TargetTime, Waypoint};

    const FIXTURE: &str = r#"{
        "geojson": {"coordinates": [[-111.9346, 33.419], [-111.9337, 33.4194], [-111.9329, 33.4201]]},
        "mrt": [61.2, 44.0],
        "stats": {"average_mrt": 52.6, "length": 164.0}
    }"#;

    fn request() -> RouteRequest {
        RouteRequest::new(
            Waypoint::new(0.0, 0.0).unwrap(),
            Waypoint::new(1.0, 1.0).unwrap(),
            TargetTime::parse_param("2026-10-19-1200").unwrap(),
            SequenceId(1),
        )
    }

    #[tokio::test]
    async fn serves_fixture_for_any_request() {
        let provider = FixtureRouteProvider::from_json(FIXTURE).unwrap();
        let route = provider.fetch(&request()).await.unwrap();
        assert_eq!(route.segments.len(), 2);
        assert_eq!(route.summary.total_length, 164.0);
    }

    #[tokio::test]
    async fn loads_from_file_and_reloads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let provider = FixtureRouteProvider::from_file(file.path()).unwrap();

        let shorter = r#"{"geojson": {"coordinates": [[0, 0], [1, 1]]}, "mrt": [20.0], "stats": {"average_mrt": 20.0, "length": 10.0}}"#;
        std::fs::write(file.path(), shorter).unwrap();
        provider.reload(file.path()).await.unwrap();

        let route = provider.fetch(&request()).await.unwrap();
        assert_eq!(route.segments.len(), 1);
        assert_eq!(route.summary.average_metric, 20.0);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_route() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let provider = FixtureRouteProvider::from_file(file.path()).unwrap();

        std::fs::write(file.path(), "{}").unwrap();
        assert!(provider.reload(file.path()).await.is_err());

        let route = provider.fetch(&request()).await.unwrap();
        assert_eq!(route.segments.len(), 2);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FixtureRouteProvider::from_file(dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn bundled_fixture_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/campus_route.json");
        let provider = FixtureRouteProvider::from_file(path).unwrap();
        let route = provider.fetch(&request()).await.unwrap();
        assert_eq!(route.segments.len(), 6);
        assert_eq!(route.segments[2].metric, 61.2);
        assert!(route.summary.is_displayable());
    }
}
