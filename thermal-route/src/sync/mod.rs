//! Route synchronization: inputs in, at most one relevant fetch out, and an
//! overlay that always matches the newest inputs.
//!
//! [`RouteController`] is the synchronous core. [`RouteSession`] drives it
//! from an input channel and a set of in-flight fetches.

mod controller;
mod guard;
mod planner;
mod session;
mod store;

pub use controller::{LogNotifier, Notifier, Phase, Resolution, RouteController};
pub use guard::{StalenessGuard, Verdict};
pub use planner::{NotReady, Plan, plan, readiness};
pub use session::RouteSession;
pub use store::{InputEvent, WaypointStore, Waypoints};
