//! Thermal comfort color scale.
//!
//! Segment colors are a step function of the segment's mean radiant
//! temperature. The same table renders the legend, so the map and its key
//! can never disagree.

use std::fmt;

/// Error returned when building an invalid scale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    #[error("breakpoints must be finite and strictly ascending")]
    NotAscending,

    #[error("expected {expected} colors for {breakpoints} breakpoints, got {colors}")]
    ColorCount {
        breakpoints: usize,
        expected: usize,
        colors: usize,
    },
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Visual style of one route segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub color: Rgb,
    pub width: f32,
    /// Index of the scale band the metric fell into.
    pub band: usize,
}

/// One row of the legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Ordered MRT breakpoints and the color of each band between them.
///
/// With breakpoints `b0 < b1 < ... < bn` there are `n + 2` bands:
/// `(-inf, b0)`, `[b0, b1)`, ..., `[bn, +inf)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalScale {
    breakpoints: Vec<f64>,
    colors: Vec<Rgb>,
    width: f32,
}

/// Default line width for route segments, in pixels.
const DEFAULT_WIDTH: f32 = 5.0;

impl ThermalScale {
    pub fn new(breakpoints: Vec<f64>, colors: Vec<Rgb>) -> Result<Self, ScaleError> {
        let ascending = breakpoints.iter().all(|b| b.is_finite())
            && breakpoints.windows(2).all(|w| w[0] < w[1]);
        if !ascending {
            return Err(ScaleError::NotAscending);
        }
        if colors.len() != breakpoints.len() + 1 {
            return Err(ScaleError::ColorCount {
                breakpoints: breakpoints.len(),
                expected: breakpoints.len() + 1,
                colors: colors.len(),
            });
        }
        Ok(Self {
            breakpoints,
            colors,
            width: DEFAULT_WIDTH,
        })
    }

    /// Set the segment line width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Index of the band containing `metric`. NaN falls in the lowest band.
    pub fn band_of(&self, metric: f64) -> usize {
        self.breakpoints.partition_point(|&b| b <= metric)
    }

    /// Style for a segment with the given metric.
    pub fn style_for(&self, metric: f64) -> SegmentStyle {
        let band = self.band_of(metric);
        SegmentStyle {
            color: self.colors[band],
            width: self.width,
            band,
        }
    }

    /// Number of bands in the scale.
    pub fn band_count(&self) -> usize {
        self.colors.len()
    }

    /// Legend rows from coolest to hottest.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.colors
            .iter()
            .enumerate()
            .map(|(band, &color)| LegendEntry {
                label: self.band_label(band),
                color,
            })
            .collect()
    }

    fn band_label(&self, band: usize) -> String {
        let lower = band.checked_sub(1).map(|i| self.breakpoints[i]);
        let upper = self.breakpoints.get(band).copied();
        match (lower, upper) {
            (None, Some(hi)) => format!("below {hi}°C"),
            (Some(lo), Some(hi)) => format!("{lo}-{hi}°C"),
            (Some(lo), None) => format!("{lo}°C and above"),
            (None, None) => "all".to_string(),
        }
    }
}

impl Default for ThermalScale {
    /// Five MRT bands from comfortable to extreme heat.
    fn default() -> Self {
        Self {
            breakpoints: vec![30.0, 40.0, 50.0, 60.0],
            colors: vec![
                Rgb(0x2c, 0x7b, 0xb6),
                Rgb(0xab, 0xd9, 0xe9),
                Rgb(0xff, 0xff, 0xbf),
                Rgb(0xfd, 0xae, 0x61),
                Rgb(0xd7, 0x19, 0x1c),
            ],
            width: DEFAULT_WIDTH,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Coloring is monotone: a hotter segment never lands in a cooler band
        #[test]
        fn band_is_monotone(a in -50.0f64..120.0, b in -50.0f64..120.0) {
            let scale = ThermalScale::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.band_of(lo) <= scale.band_of(hi));
        }
    }
}
