//! Map overlay: markers, colored route segments and the surface they are
//! drawn on.

mod reconciler;
mod scale;
mod surface;

pub use reconciler::{DisplayedRoute, MARKER_LAYER, OverlayReconciler, OverlayState, ROUTE_LAYER};
pub use scale::{LegendEntry, Rgb, ScaleError, SegmentStyle, ThermalScale};
pub use surface::{DisplaySurface, Graphic, GraphicHandle, LayerId, MarkerRole, MemorySurface};
