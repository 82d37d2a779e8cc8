//! Overlay reconciliation.
//!
//! Keeps the display surface in step with the desired overlay using the
//! fewest add/remove calls. Markers are diffed individually; the route is
//! always replaced as a whole because a new thermal computation changes
//! every edge's color.

use tracing::trace;

use crate::domain::{RouteSegment, RouteSummary, SequenceId, Waypoint};

use super::scale::ThermalScale;
use super::surface::{DisplaySurface, Graphic, GraphicHandle, LayerId, MarkerRole};

/// Layer holding the start and end markers.
pub const MARKER_LAYER: &str = "waypoints";

/// Layer holding the colored route segments.
pub const ROUTE_LAYER: &str = "thermal-route";

/// A committed route as shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedRoute {
    /// Request whose result this is.
    pub sequence_id: SequenceId,
    pub segments: Vec<RouteSegment>,
    pub summary: RouteSummary,
}

/// Everything the overlay should show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    pub start_marker: Option<Waypoint>,
    pub end_marker: Option<Waypoint>,
    pub route: Option<DisplayedRoute>,
}

impl OverlayState {
    pub fn segments(&self) -> &[RouteSegment] {
        self.route.as_ref().map_or(&[], |r| r.segments.as_slice())
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        self.route.as_ref().map(|r| &r.summary)
    }
}

/// Owns the overlay state and the surface it is drawn on.
pub struct OverlayReconciler<S> {
    surface: S,
    scale: ThermalScale,
    marker_layer: Option<LayerId>,
    route_layer: Option<LayerId>,
    state: OverlayState,
    start: Option<(Waypoint, GraphicHandle)>,
    end: Option<(Waypoint, GraphicHandle)>,
    segment_handles: Vec<GraphicHandle>,
}

impl<S: DisplaySurface> OverlayReconciler<S> {
    /// Create a reconciler for an empty surface.
    pub fn new(surface: S, scale: ThermalScale) -> Self {
        let marker_layer = surface.find_layer(MARKER_LAYER);
        let route_layer = surface.find_layer(ROUTE_LAYER);
        Self {
            surface,
            scale,
            marker_layer,
            route_layer,
            state: OverlayState::default(),
            start: None,
            end: None,
            segment_handles: Vec::new(),
        }
    }

    /// Make the surface show `desired`.
    ///
    /// Idempotent: applying the current state again touches nothing.
    pub fn apply(&mut self, desired: OverlayState) {
        reconcile_marker(
            &mut self.surface,
            self.marker_layer,
            MarkerRole::Start,
            &mut self.start,
            desired.start_marker,
        );
        reconcile_marker(
            &mut self.surface,
            self.marker_layer,
            MarkerRole::End,
            &mut self.end,
            desired.end_marker,
        );

        if self.state.route != desired.route {
            self.replace_route(desired.route.as_ref());
        }

        self.state = desired;
    }

    fn replace_route(&mut self, route: Option<&DisplayedRoute>) {
        let removed = self.segment_handles.len();
        for handle in self.segment_handles.drain(..) {
            self.surface.remove_graphic(handle);
        }

        if let Some(route) = route {
            for segment in &route.segments {
                let graphic = Graphic::Segment {
                    path: segment.path,
                    metric: segment.metric,
                    style: self.scale.style_for(segment.metric),
                };
                let handle = self.surface.add_graphic(self.route_layer, graphic);
                self.segment_handles.push(handle);
            }
        }

        trace!(
            removed,
            added = self.segment_handles.len(),
            "replaced route segments"
        );
    }

    /// The overlay currently shown.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn scale(&self) -> &ThermalScale {
        &self.scale
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

fn reconcile_marker<S: DisplaySurface>(
    surface: &mut S,
    layer: Option<LayerId>,
    role: MarkerRole,
    shown: &mut Option<(Waypoint, GraphicHandle)>,
    desired: Option<Waypoint>,
) {
    if shown.map(|(at, _)| at) == desired {
        return;
    }
    if let Some((_, handle)) = shown.take() {
        surface.remove_graphic(handle);
    }
    if let Some(at) = desired {
        let handle = surface.add_graphic(layer, Graphic::Marker { role, at });
        *shown = Some((at, handle));
    }
    trace!(?role, ?desired, "reconciled marker");
}
