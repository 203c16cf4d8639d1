//! Ellipsoid primitive for ray tracing.
//!
//! The surface is a sphere of `radius` stretched per axis by `semi_axes`:
//! `((x-cx)/a)² + ((y-cy)/b)² + ((z-cz)/c)² = radius²`. Intersections come
//! from solving the resulting quadratic in the ray parameter.

use glam::Vec3A;
use crate::ray::Ray;
use crate::geometry::{Geometry, Intersection};
use crate::interval::Interval;
use crate::material::{Color, Material};

/// Axis-aligned ellipsoid defined by center, per-axis scale, radius and material.
#[derive(Debug, Clone)]
pub struct Ellipsoid {
    /// Center point of the ellipsoid in world coordinates.
    pub center: Vec3A,

    /// Per-axis scale factors (a, b, c).
    ///
    /// A zero component degenerates the quadric and is not supported.
    pub semi_axes: Vec3A,

    /// Radius of the unscaled sphere.
    pub radius: f32,

    /// Material properties used for shading.
    pub material: Material,

    /// Base surface color.
    pub color: Color,
}

impl Ellipsoid {
    /// Create a new ellipsoid with an explicit material.
    pub fn new(center: Vec3A, semi_axes: Vec3A, radius: f32, material: Material, color: Color) -> Self {
        Self {
            center,
            semi_axes,
            radius,
            material,
            color,
        }
    }

    /// Create an ellipsoid whose material is derived from its color.
    pub fn with_color(center: Vec3A, semi_axes: Vec3A, radius: f32, color: Color) -> Self {
        Self::new(center, semi_axes, radius, Material::from_color(color), color)
    }

    /// Unit surface normal at a point on the surface: the normalized gradient of the quadric.
    pub fn normal_at(&self, point: Vec3A) -> Vec3A {
        let inv_sq = (self.semi_axes * self.semi_axes).recip();
        ((point - self.center) * inv_sq).normalize()
    }

    fn hit_at(&self, r: &Ray, t: f32) -> Intersection {
        let normal = self.normal_at(r.at(t));
        Intersection::new(*r, t, normal, self.material, self.color)
    }
}

impl Geometry for Ellipsoid {
    fn intersect(&self, r: &Ray, range: Interval) -> Option<Intersection> {
        // Ray origin in the ellipsoid's local frame
        let o = r.origin - self.center;
        let d = r.direction;
        let inv_sq = (self.semi_axes * self.semi_axes).recip();

        // Quadratic coefficients of the scaled-sphere equation
        let a = (d * d * inv_sq).element_sum();
        let b = 2.0 * (o * d * inv_sq).element_sum();
        let c = (o * o * inv_sq).element_sum() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        // Prefer the near crossing; fall back to the far one when the
        // near one is outside the window (e.g. the origin is inside).
        [near, far]
            .into_iter()
            .find(|&t| range.contains(t))
            .map(|t| self.hit_at(r, t))
    }
}
