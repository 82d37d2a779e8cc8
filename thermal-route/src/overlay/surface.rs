//! Display surface abstraction.
//!
//! The engine never assumes a rendering technology. A surface only has to
//! look up layers and add or remove graphics by handle.

use std::collections::BTreeMap;

use crate::domain::{Coordinate, Waypoint};

use super::scale::SegmentStyle;

/// Handle to a layer on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

/// Handle to a graphic previously added to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicHandle(pub u64);

/// Which end of the route a marker designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    Start,
    End,
}

/// A graphic the engine asks the surface to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Marker {
        role: MarkerRole,
        at: Waypoint,
    },
    Segment {
        path: [Coordinate; 2],
        metric: f64,
        style: SegmentStyle,
    },
}

/// Something graphics can be drawn on, e.g. a web map view.
pub trait DisplaySurface {
    /// Look up a layer by id.
    fn find_layer(&self, id: &str) -> Option<LayerId>;

    /// Draw a graphic, on the given layer or the surface root.
    fn add_graphic(&mut self, layer: Option<LayerId>, graphic: Graphic) -> GraphicHandle;

    /// Remove a previously added graphic. Unknown handles are ignored.
    fn remove_graphic(&mut self, handle: GraphicHandle);
}

/// In-memory surface that records what is currently drawn.
///
/// Used headless (the console binary) and in tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    layers: Vec<String>,
    graphics: BTreeMap<GraphicHandle, (Option<LayerId>, Graphic)>,
    next_handle: u64,
    adds: usize,
    removes: usize,
}

impl MemorySurface {
    /// Create a surface with the given named layers.
    pub fn with_layers<I, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            layers: layers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// All graphics currently drawn, in insertion order.
    pub fn graphics(&self) -> impl Iterator<Item = &Graphic> {
        self.graphics.values().map(|(_, g)| g)
    }

    /// Graphics currently drawn on a layer.
    pub fn graphics_on(&self, layer: Option<LayerId>) -> impl Iterator<Item = &Graphic> {
        self.graphics
            .values()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, g)| g)
    }

    /// The currently drawn marker for a role, if any.
    pub fn marker(&self, role: MarkerRole) -> Option<Waypoint> {
        self.graphics().find_map(|g| match g {
            Graphic::Marker { role: r, at } if *r == role => Some(*at),
            _ => None,
        })
    }

    /// Number of currently drawn segments.
    pub fn segment_count(&self) -> usize {
        self.graphics()
            .filter(|g| matches!(g, Graphic::Segment { .. }))
            .count()
    }

    /// Metrics of the drawn segments, in draw order.
    pub fn segment_metrics(&self) -> Vec<f64> {
        self.graphics()
            .filter_map(|g| match g {
                Graphic::Segment { metric, .. } => Some(*metric),
                Graphic::Marker { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    /// Total add and remove calls so far.
    pub fn operation_count(&self) -> usize {
        self.adds + self.removes
    }
}

impl DisplaySurface for MemorySurface {
    fn find_layer(&self, id: &str) -> Option<LayerId> {
        self.layers.iter().position(|l| l == id).map(LayerId)
    }

    fn add_graphic(&mut self, layer: Option<LayerId>, graphic: Graphic) -> GraphicHandle {
        let handle = GraphicHandle(self.next_handle);
        self.next_handle += 1;
        self.adds += 1;
        self.graphics.insert(handle, (layer, graphic));
        handle
    }

    fn remove_graphic(&mut self, handle: GraphicHandle) {
        self.removes += 1;
        self.graphics.remove(&handle);
    }
}
