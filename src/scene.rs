//! Scene container and nearest-hit traversal.
//!
//! Every query tests every geometry; there is no spatial index.

use glam::Vec3A;
use crate::geometry::{Geometry, GeometryId, Intersection};
use crate::interval::Interval;
use crate::material::Light;
use crate::ray::Ray;

/// Offset from the shaded point where shadow rays start, to avoid self-hits.
pub const SHADOW_BIAS: f32 = 0.0001;

/// Geometries and lights making up a renderable scene.
#[derive(Default)]
pub struct Scene {
    geometries: Vec<Box<dyn Geometry>>,
    /// Point lights illuminating the scene
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry and return its handle.
    pub fn add(&mut self, geometry: Box<dyn Geometry>) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Look up a geometry by handle.
    pub fn geometry(&self, id: GeometryId) -> Option<&dyn Geometry> {
        self.geometries.get(id.0).map(|g| g.as_ref())
    }

    /// Number of geometries in the scene.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// True when the scene holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Nearest visible hit along `ray` within `range`, tagged with its geometry.
    ///
    /// On equal distances the geometry added first wins.
    pub fn find_first_intersection(&self, ray: &Ray, range: Interval) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;

        for (index, geometry) in self.geometries.iter().enumerate() {
            let Some(mut hit) = geometry.intersect(ray, range).filter(|hit| hit.visible) else {
                continue;
            };
            if closest.as_ref().is_some_and(|best| best.t <= hit.t) {
                continue;
            }
            hit.geometry = Some(GeometryId(index));
            closest = Some(hit);
        }

        closest
    }

    /// Whether `light` reaches `point`.
    ///
    /// The point is lit when the shadow ray hits nothing before the light, or
    /// when the first thing it hits does not cast shadows.
    pub fn is_lit(&self, point: Vec3A, light: &Light) -> bool {
        let shadow_ray = Ray::through(point, light.position);
        let max_dist = (light.position - point).length() + 1.0;

        match self.find_first_intersection(&shadow_ray, Interval::new(SHADOW_BIAS, max_dist)) {
            None => true,
            Some(blocker) => blocker
                .geometry
                .and_then(|id| self.geometry(id))
                .is_some_and(|geometry| !geometry.casts_shadow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::Ellipsoid;
    use crate::material::Color;
    use crate::volume::{Volume, VolumeHeader};
    use crate::colormap::ColorMap;
    use glam::UVec3;

    fn sphere(z: f32, color: Color) -> Box<dyn Geometry> {
        Box::new(Ellipsoid::with_color(Vec3A::new(0.0, 0.0, z), Vec3A::ONE, 1.0, color))
    }

    fn light_at(position: Vec3A) -> Light {
        Light::new(position, Color::splat(0.1), Color::ONE, Color::ONE)
    }

    /// Solid 2x2x2 block spanning [-1, 1] on every axis.
    fn block() -> Box<dyn Geometry> {
        let header = VolumeHeader { resolution: UVec3::splat(2), thickness: Vec3A::ONE };
        Box::new(Volume::new(header, vec![255; 8], Vec3A::splat(-1.0), 1.0, ColorMap::default()).unwrap())
    }

    fn z_ray() -> Ray {
        Ray::new(Vec3A::new(0.0, 0.0, -10.0), Vec3A::Z)
    }

    #[test]
    fn nearest_hit_wins_regardless_of_order() {
        let near = Color::new(1.0, 0.0, 0.0, 1.0);
        let far = Color::new(0.0, 0.0, 1.0, 1.0);
        let range = Interval::new(0.0, 100.0);

        let mut front_first = Scene::new();
        front_first.add(sphere(0.0, near));
        front_first.add(sphere(1.5, far));

        let mut back_first = Scene::new();
        back_first.add(sphere(1.5, far));
        back_first.add(sphere(0.0, near));

        let a = front_first.find_first_intersection(&z_ray(), range).unwrap();
        let b = back_first.find_first_intersection(&z_ray(), range).unwrap();
        assert!((a.t - 9.0).abs() < 1e-5);
        assert!((b.t - 9.0).abs() < 1e-5);
        assert_eq!(a.color, near);
        assert_eq!(b.color, near);
        assert_eq!(a.geometry, Some(GeometryId(0)));
        assert_eq!(b.geometry, Some(GeometryId(1)));
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.find_first_intersection(&z_ray(), Interval::new(0.0, 100.0)).is_none());
    }

    #[test]
    fn opaque_occluder_shadows_point() {
        let mut scene = Scene::new();
        scene.add(sphere(0.0, Color::ONE));
        let point = Vec3A::new(0.0, 0.0, -5.0);
        assert!(!scene.is_lit(point, &light_at(Vec3A::new(0.0, 0.0, 5.0))));
        assert!(scene.is_lit(point, &light_at(Vec3A::new(0.0, 0.0, -8.0))));
    }

    #[test]
    fn occluder_past_the_light_is_ignored() {
        let mut scene = Scene::new();
        scene.add(sphere(10.0, Color::ONE));
        let point = Vec3A::new(0.0, 0.0, -5.0);
        assert!(scene.is_lit(point, &light_at(Vec3A::new(0.0, 0.0, 3.0))));
    }

    #[test]
    fn volume_never_casts_shadows() {
        let mut scene = Scene::new();
        let id = scene.add(block());
        let point = Vec3A::new(0.0, 0.0, -5.0);
        let light = light_at(Vec3A::new(0.0, 0.0, 5.0));

        // The block does sit on the shadow ray
        let shadow_ray = Ray::through(point, light.position);
        let blocker = scene.find_first_intersection(&shadow_ray, Interval::new(SHADOW_BIAS, 11.0)).unwrap();
        assert_eq!(blocker.geometry, Some(id));

        assert!(scene.is_lit(point, &light));
    }
}
