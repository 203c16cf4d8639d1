//! Material and light values for Phong shading.
//!
//! Colors are RGBA `Vec4`s; the alpha channel doubles as opacity for
//! volumetric compositing.

use glam::{Vec3A, Vec4};
use serde::Deserialize;

/// RGBA color type. `w` is alpha / opacity.
pub type Color = Vec4;

/// Phong material coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Material {
    /// Reflectance under ambient light.
    pub ambient: Color,
    /// Lambertian reflectance.
    pub diffuse: Color,
    /// Highlight reflectance.
    pub specular: Color,
    /// Phong exponent applied to the reflection alignment.
    pub shininess: f32,
}

impl Material {
    /// Create a material from explicit coefficients.
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self { ambient, diffuse, specular, shininess }
    }

    /// Derive a plain material from a single surface color.
    ///
    /// Used for geometry configured with only a color and for composited volume samples.
    pub fn from_color(color: Color) -> Self {
        Self {
            ambient: color * 0.1,
            diffuse: color * 0.8,
            specular: color * 0.2,
            shininess: 10.0,
        }
    }
}

/// Point light with separate Phong intensities.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Light {
    /// World-space position.
    pub position: Vec3A,
    /// Ambient intensity, added regardless of visibility.
    pub ambient: Color,
    /// Diffuse intensity.
    pub diffuse: Color,
    /// Specular intensity.
    pub specular: Color,
}

impl Light {
    /// Create a point light.
    pub fn new(position: Vec3A, ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self { position, ambient, diffuse, specular }
    }
}

/// Reflect `v` about the unit normal `n`, keeping it on the same side as `v`.
///
/// Returns `2n(n·v) - v`, normalized.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    (n * (2.0 * n.dot(v)) - v).normalize()
}
