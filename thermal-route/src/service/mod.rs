//! Thermal routing service client.
//!
//! The routing service owns the path-finding and mean radiant temperature
//! computation. This module sends it a start, end and target hour, and turns
//! its answer into domain [`RouteSegment`](crate::domain::RouteSegment)s.
//!
//! Response shape:
//! - `geojson.coordinates`: ordered `[lon, lat]` positions
//! - `mrt`: one metric per consecutive coordinate pair
//! - `stats`: whole-route `average_mrt` and `length`

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{HttpRouteClient, RouteServiceConfig};
pub use convert::{ConversionError, build_segments, convert_route};
pub use error::{FailureKind, RouteError};
pub use mock::FixtureRouteProvider;
pub use provider::RouteProvider;
pub use types::{LineGeometry, RouteResponse, RouteStats};
