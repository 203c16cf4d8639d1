//! Interval arithmetic for ray parameter ranges.
//!
//! Provides the closed `[min, max]` window every intersection query is made in.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Intersection of two intervals; empty (min > max) when they are disjoint.
    pub fn intersect(&self, other: Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// True when no value lies in the interval.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}
