//! Thermal routing service HTTP client.
//!
//! Sends the start, end and target hour of a request to the routing service
//! and converts its GeoJSON + per-edge MRT response into domain segments.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{RouteRequest, RouteResult};

use super::convert::convert_route;
use super::error::RouteError;
use super::provider::RouteProvider;
use super::types::RouteResponse;

/// Default base URL for the routing service.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the route endpoint.
const DEFAULT_ROUTE_PATH: &str = "/route";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the routing service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteServiceConfig {
    /// Base URL of the service
    pub base_url: String,
    /// Path of the route endpoint, appended to the base URL
    pub route_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RouteServiceConfig {
    /// Create a new config pointing at the given service.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `THERMAL_ROUTE_URL`, `THERMAL_ROUTE_PATH` and
    /// `THERMAL_ROUTE_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(
            lookup("THERMAL_ROUTE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        if let Some(path) = lookup("THERMAL_ROUTE_PATH") {
            config = config.with_route_path(path);
        }
        if let Some(raw) = lookup("THERMAL_ROUTE_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => config = config.with_timeout(secs),
                Err(_) => warn!(value = %raw, "ignoring invalid THERMAL_ROUTE_TIMEOUT_SECS"),
            }
        }
        config
    }

    /// Set a custom endpoint path.
    pub fn with_route_path(mut self, path: impl Into<String>) -> Self {
        self.route_path = path.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The full URL of the route endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.route_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Default for RouteServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the thermal routing service.
#[derive(Debug, Clone)]
pub struct HttpRouteClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRouteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RouteServiceConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    /// Fetch and parse a route.
    pub async fn get_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        debug!(
            seq = %request.sequence_id(),
            start = %request.start(),
            end = %request.end(),
            time = %request.time(),
            "requesting thermal route"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&request.query_params())
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let payload: RouteResponse =
            serde_json::from_str(&body).map_err(|e| RouteError::Malformed {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_route(&payload)?)
    }
}

impl RouteProvider for HttpRouteClient {
    async fn fetch(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        self.get_route(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{Coordinate, SequenceId, TargetTime, Waypoint};
    use crate::service::FailureKind;

    fn request() -> RouteRequest {
        RouteRequest::new(
            Waypoint::new(-111.9346, 33.419).unwrap(),
            Waypoint::new(-111.928, 33.4215).unwrap(),
            TargetTime::parse_param("2026-07-01-1500").unwrap(),
            SequenceId(1),
        )
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> HttpRouteClient {
        HttpRouteClient::new(RouteServiceConfig::new(base_url).with_timeout(5)).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = RouteServiceConfig::new("http://campus:9000")
            .with_route_path("/api/thermal")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://campus:9000");
        assert_eq!(config.route_path, "/api/thermal");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.endpoint(), "http://campus:9000/api/thermal");
    }

    #[test]
    fn config_defaults() {
        let config = RouteServiceConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.route_path, DEFAULT_ROUTE_PATH);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn endpoint_joins_slashes() {
        let config = RouteServiceConfig::new("http://host/").with_route_path("route");
        assert_eq!(config.endpoint(), "http://host/route");
    }

    #[test]
    fn config_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("THERMAL_ROUTE_URL", "http://mrt.example"),
            ("THERMAL_ROUTE_PATH", "/v2/route"),
            ("THERMAL_ROUTE_TIMEOUT_SECS", "12"),
        ]
        .into_iter()
        .collect();
        let config = RouteServiceConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.endpoint(), "http://mrt.example/v2/route");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn config_from_lookup_ignores_bad_timeout() {
        let config = RouteServiceConfig::from_lookup(|k| {
            (k == "THERMAL_ROUTE_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config, RouteServiceConfig::default());
    }

    #[tokio::test]
    async fn fetches_and_converts_route() {
        async fn handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
            assert_eq!(params["startLatitude"], "33.419");
            assert_eq!(params["startLongitude"], "-111.9346");
            assert_eq!(params["endLatitude"], "33.4215");
            assert_eq!(params["endLongitude"], "-111.928");
            assert_eq!(params["dateTimeUTC"], "2026-07-01-1500");
            Json(json!({
                "geojson": {"coordinates": [[-111.9346, 33.419], [-111.93, 33.42], [-111.928, 33.4215]]},
                "mrt": [55.1, 38.4],
                "stats": {"average_mrt": 46.75, "length": 812.5}
            }))
        }
        let base = serve(Router::new().route("/route", get(handler))).await;

        let route = client(&base).fetch(&request()).await.unwrap();

        assert_eq!(route.segments.len(), 2);
        assert_eq!(route.segments[0].metric, 55.1);
        assert_eq!(route.segments[1].path[1], Coordinate::new(-111.928, 33.4215));
        assert_eq!(route.summary.average_metric, 46.75);
        assert_eq!(route.summary.total_length, 812.5);
    }

    #[tokio::test]
    async fn non_success_status_is_service_error() {
        let base = serve(Router::new().route(
            "/route",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "no graph loaded") }),
        ))
        .await;

        let err = client(&base).fetch(&request()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Service);
        match err {
            RouteError::Service { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "no graph loaded");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let base = serve(Router::new().route("/route", get(|| async { "not json" }))).await;

        let err = client(&base).fetch(&request()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Malformed);
        match err {
            RouteError::Malformed { body, .. } => assert_eq!(body.as_deref(), Some("not json")),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn metric_length_mismatch_is_malformed() {
        let base = serve(Router::new().route(
            "/route",
            get(|| async {
                Json(json!({
                    "geojson": {"coordinates": [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]},
                    "mrt": [10.0],
                    "stats": {"average_mrt": 10.0, "length": 5.0}
                }))
            }),
        ))
        .await;

        let err = client(&base).fetch(&request()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Malformed);
        assert!(err.to_string().contains("expected 2 metrics"));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .fetch(&request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
    }
}
