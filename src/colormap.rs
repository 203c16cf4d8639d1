//! Density to color transfer function for volumes.

use serde::Deserialize;
use crate::material::Color;

/// One control point of a [`ColorMap`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorStop {
    /// Density this stop applies to.
    pub density: u8,
    /// RGBA color; alpha is the voxel opacity.
    pub color: Color,
}

/// Piecewise-linear lookup from voxel density to color and opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    stops: Vec<ColorStop>,
}

impl ColorMap {
    /// Build a map from control points. Stops are sorted by density.
    ///
    /// An empty stop list maps every density to transparent black.
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by_key(|stop| stop.density);
        Self { stops }
    }

    /// Color for a density value; the returned alpha is the opacity.
    ///
    /// Densities below the first stop or above the last one clamp to it.
    pub fn color_for(&self, density: u8) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::ZERO,
        };
        if density <= first.density {
            return first.color;
        }
        if density >= last.density {
            return last.color;
        }

        // First stop strictly above `density`; the previous one is at or below it
        let upper = self.stops.partition_point(|stop| stop.density <= density);
        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let span = (hi.density - lo.density) as f32;
        let f = (density - lo.density) as f32 / span;
        lo.color.lerp(hi.color, f)
    }
}

impl Default for ColorMap {
    /// CT-style ramp: faint soft tissue, reddish muscle, opaque bone.
    fn default() -> Self {
        Self::new(vec![
            ColorStop { density: 1, color: Color::new(0.8, 0.6, 0.5, 0.02) },
            ColorStop { density: 60, color: Color::new(0.9, 0.4, 0.3, 0.1) },
            ColorStop { density: 140, color: Color::new(0.95, 0.85, 0.7, 0.6) },
            ColorStop { density: 255, color: Color::new(1.0, 1.0, 0.95, 1.0) },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> ColorMap {
        ColorMap::new(vec![
            ColorStop { density: 200, color: Color::new(1.0, 1.0, 1.0, 1.0) },
            ColorStop { density: 100, color: Color::new(0.0, 0.0, 0.0, 0.0) },
        ])
    }

    #[test]
    fn interpolates_between_stops() {
        let c = two_stop().color_for(150);
        assert!((c - Color::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn clamps_outside_stops() {
        let map = two_stop();
        assert_eq!(map.color_for(10), Color::ZERO);
        assert_eq!(map.color_for(255), Color::ONE);
        assert_eq!(map.color_for(200), Color::ONE);
    }

    #[test]
    fn empty_map_is_transparent() {
        assert_eq!(ColorMap::new(Vec::new()).color_for(42), Color::ZERO);
    }
}
