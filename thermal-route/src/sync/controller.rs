//! Route controller.
//!
//! Ties the store, planner, guard and reconciler together. All methods are
//! synchronous and run to completion; the only asynchronous part of the
//! engine is the fetch itself, which lives in
//! [`RouteSession`](super::RouteSession).
//!
//! Phases:
//! - `Empty`: no route shown, nothing relevant in flight
//! - `Fetching`: a relevant request is in flight (a previous route may still
//!   be shown; it stays until the new one commits)
//! - `Displayed`: the newest committed route is shown

use tracing::{debug, info, warn};

use crate::domain::{RouteRequest, RouteResult, RouteSummary, SequenceId, TargetTime};
use crate::overlay::{
    DisplaySurface, DisplayedRoute, OverlayReconciler, OverlayState, ThermalScale,
};
use crate::service::{FailureKind, RouteError};

use super::guard::{StalenessGuard, Verdict};
use super::planner::{Plan, plan};
use super::store::{InputEvent, WaypointStore, Waypoints};

/// Receives route failures worth telling the user about (e.g. a toast).
pub trait Notifier {
    fn report(&mut self, error: &RouteError);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report(&mut self, error: &RouteError) {
        warn!(kind = %error.kind(), %error, "route unavailable");
    }
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Fetching,
    Displayed,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The route is now displayed.
    Committed,
    /// The fetch failed; the failure was reported and the overlay kept.
    Failed(FailureKind),
    /// The result was no longer relevant and was dropped.
    Superseded,
}

/// Keeps the overlay consistent with the current inputs.
pub struct RouteController<S, N> {
    store: WaypointStore,
    guard: StalenessGuard,
    overlay: OverlayReconciler<S>,
    notifier: N,
    phase: Phase,
}

impl<S: DisplaySurface, N: Notifier> RouteController<S, N> {
    /// Create a controller targeting the current hour.
    pub fn new(surface: S, notifier: N) -> Self {
        Self::with_options(surface, notifier, ThermalScale::default(), TargetTime::now())
    }

    pub fn with_options(surface: S, notifier: N, scale: ThermalScale, time: TargetTime) -> Self {
        Self {
            store: WaypointStore::new(time),
            guard: StalenessGuard::new(),
            overlay: OverlayReconciler::new(surface, scale),
            notifier,
            phase: Phase::Empty,
        }
    }

    /// Apply an input change and run one planning pass.
    ///
    /// Returns the request to fetch, if the new inputs warrant one. Markers
    /// are updated immediately either way; the route is cleared immediately
    /// when the inputs are no longer ready.
    pub fn handle(&mut self, event: InputEvent) -> Option<RouteRequest> {
        let inputs = *self.store.apply(event);
        let route = self.overlay.state().route.clone();

        match plan(&inputs, &mut self.guard) {
            Plan::Fetch(request) => {
                self.overlay.apply(desired(&inputs, route));
                self.phase = Phase::Fetching;
                Some(request)
            }
            Plan::Clear(_) => {
                if let Some(retired) = self.guard.retire() {
                    debug!(seq = %retired, "retired in-flight request");
                }
                self.overlay.apply(desired(&inputs, None));
                self.phase = Phase::Empty;
                None
            }
        }
    }

    /// Deliver the outcome of the fetch for `id`.
    pub fn resolve(
        &mut self,
        id: SequenceId,
        outcome: Result<RouteResult, RouteError>,
    ) -> Resolution {
        if self.guard.resolve(id) == Verdict::Superseded {
            debug!(seq = %id, ok = outcome.is_ok(), "discarding superseded route result");
            return Resolution::Superseded;
        }

        match outcome {
            Ok(result) => {
                info!(
                    seq = %id,
                    segments = result.segments.len(),
                    average_mrt = result.summary.average_metric,
                    length_m = result.summary.total_length,
                    "committing route"
                );
                let route = DisplayedRoute {
                    sequence_id: id,
                    segments: result.segments,
                    summary: result.summary,
                };
                let inputs = *self.store.snapshot();
                self.overlay.apply(desired(&inputs, Some(route)));
                self.guard.record_commit(id);
                self.phase = Phase::Displayed;
                Resolution::Committed
            }
            Err(error) => {
                warn!(seq = %id, kind = %error.kind(), %error, "route fetch failed");
                self.notifier.report(&error);
                self.phase = if self.overlay.state().route.is_some() {
                    Phase::Displayed
                } else {
                    Phase::Empty
                };
                Resolution::Failed(error.kind())
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn inputs(&self) -> &Waypoints {
        self.store.snapshot()
    }

    /// The overlay currently shown.
    pub fn overlay(&self) -> &OverlayState {
        self.overlay.state()
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        self.overlay.state().summary()
    }

    pub fn scale(&self) -> &ThermalScale {
        self.overlay.scale()
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn guard(&self) -> &StalenessGuard {
        &self.guard
    }

    pub fn surface(&self) -> &S {
        self.overlay.surface()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

fn desired(inputs: &Waypoints, route: Option<DisplayedRoute>) -> OverlayState {
    OverlayState {
        start_marker: inputs.start,
        end_marker: inputs.end,
        route,
    }
}
