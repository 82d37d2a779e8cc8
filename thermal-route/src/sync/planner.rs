//! Request planning.
//!
//! Decides after each input change whether a route fetch is warranted.
//! There is no debounce: every ready change issues a new request, and the
//! staleness guard keeps only the newest result.

use std::fmt;

use tracing::debug;

use crate::domain::{RouteRequest, Waypoint};

use super::guard::StalenessGuard;
use super::store::Waypoints;

/// Why the inputs cannot produce a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReady {
    MissingStart,
    MissingEnd,
    SameEndpoints,
}

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            NotReady::MissingStart => "no start selected",
            NotReady::MissingEnd => "no end selected",
            NotReady::SameEndpoints => "start and end are the same point",
        };
        f.write_str(reason)
    }
}

/// Outcome of a planning pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Issue this request.
    Fetch(RouteRequest),
    /// Clear the route; nothing to fetch.
    Clear(NotReady),
}

/// The readiness predicate: both endpoints present and distinct.
///
/// The target time is always set; it defaults to the current hour.
pub fn readiness(inputs: &Waypoints) -> Result<(Waypoint, Waypoint), NotReady> {
    let start = inputs.start.ok_or(NotReady::MissingStart)?;
    let end = inputs.end.ok_or(NotReady::MissingEnd)?;
    if start == end {
        return Err(NotReady::SameEndpoints);
    }
    Ok((start, end))
}

/// Plan a route for the current inputs.
///
/// When ready, a fresh sequence id is issued through `guard` before the
/// request is returned, so the guard always knows the newest request.
pub fn plan(inputs: &Waypoints, guard: &mut StalenessGuard) -> Plan {
    match readiness(inputs) {
        Ok((start, end)) => {
            let request = RouteRequest::new(start, end, inputs.time, guard.issue());
            debug!(
                seq = %request.sequence_id(),
                %start,
                %end,
                time = %inputs.time,
                "planned route request"
            );
            Plan::Fetch(request)
        }
        Err(reason) => {
            debug!(%reason, "inputs not ready, no fetch");
            Plan::Clear(reason)
        }
    }
}
