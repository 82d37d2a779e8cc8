//! Domain types for the thermal route engine.
//!
//! All types enforce their invariants at construction time: a [`Waypoint`]
//! is always a complete, in-range coordinate pair and a [`TargetTime`] is
//! always an hour in UTC. Code that receives these types can trust them.

mod route;
mod time;
mod units;
mod waypoint;

pub use route::{RouteRequest, RouteResult, RouteSegment, RouteSummary, SequenceId};
pub use time::{TargetTime, TimeError};
pub use units::{UnitSystem, celsius_to_fahrenheit, format_summary, meters_to_feet};
pub use waypoint::{Coordinate, InvalidWaypoint, Waypoint};
