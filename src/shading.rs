//! Phong local illumination with hard shadows.

use glam::Vec3A;
use crate::geometry::Intersection;
use crate::material::{reflect, Color, Light};
use crate::scene::Scene;

/// Color of a hit seen from `eye`, summed over every light in the scene.
///
/// Each light always contributes its ambient term. Diffuse and specular
/// terms are added only when [`Scene::is_lit`] reports the light visible.
pub fn shade(scene: &Scene, hit: &Intersection, eye: Vec3A) -> Color {
    scene
        .lights
        .iter()
        .map(|light| {
            let ambient = hit.material.ambient * light.ambient;
            if scene.is_lit(hit.position, light) {
                ambient + direct(hit, light, eye)
            } else {
                ambient
            }
        })
        .fold(Color::ZERO, |acc, c| acc + c)
}

/// Diffuse and specular contribution of an unoccluded light.
fn direct(hit: &Intersection, light: &Light, eye: Vec3A) -> Color {
    let material = &hit.material;
    let n = hit.normal;
    let to_light = (light.position - hit.position).normalize();
    let to_eye = (eye - hit.position).normalize();

    let mut color = Color::ZERO;

    let n_dot_t = n.dot(to_light);
    if n_dot_t > 0.0 {
        color += material.diffuse * light.diffuse * n_dot_t;
    }

    let e_dot_r = to_eye.dot(reflect(to_light, n));
    if e_dot_r > 0.0 {
        color += material.specular * light.specular * e_dot_r.powf(material.shininess);
    }

    color
}
