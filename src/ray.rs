//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Rays built with
//! [`Ray::through`] carry a unit direction, so `t` measures world distance.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, the shaded point for shadow rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `from` and heading towards `to`.
    ///
    /// The direction is normalized, so `at(|to - from|)` lands on `to`.
    pub fn through(from: Vec3A, to: Vec3A) -> Self {
        Self::new(from, (to - from).normalize())
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
