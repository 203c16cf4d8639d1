//! Ray-object intersection system.
//!
//! Defines the [`Geometry`] trait implemented by every primitive and the
//! [`Intersection`] record a successful query produces.

use glam::Vec3A;
use crate::ray::Ray;
use crate::interval::Interval;
use crate::material::{Color, Material};

/// Opaque handle to a geometry inside a [`crate::scene::Scene`].
///
/// Only used for identity checks; it never grants access to mutate the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

/// Ray-object intersection information.
///
/// A query that misses returns `None` instead of a record, so every
/// `Intersection` that exists is valid: `t` lies in the query range and
/// `normal` is a unit vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// False for hits that should be ignored by scene traversal
    pub visible: bool,
    /// Primitive that produced the hit, filled in by the scene
    pub geometry: Option<GeometryId>,
    /// Ray the hit is expressed on
    pub ray: Ray,
    /// Distance along the query ray to the hit
    pub t: f32,
    /// World position of the hit
    pub position: Vec3A,
    /// Surface normal at the hit (unit vector)
    pub normal: Vec3A,
    /// Material used for shading the hit
    pub material: Material,
    /// Base color of the hit surface
    pub color: Color,
}

impl Intersection {
    /// Build a visible hit at parameter `t` along `ray`.
    pub fn new(ray: Ray, t: f32, normal: Vec3A, material: Material, color: Color) -> Self {
        Self {
            visible: true,
            geometry: None,
            ray,
            t,
            position: ray.at(t),
            normal,
            material,
            color,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so a loaded scene can be shared freely.
pub trait Geometry: Sync + Send {
    /// Test for ray intersection within the closed parameter range.
    ///
    /// Returns the hit closest to the start of the range that this primitive
    /// reports, or `None`.
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<Intersection>;

    /// Whether this primitive blocks light for shadow rays.
    fn casts_shadow(&self) -> bool {
        true
    }
}
