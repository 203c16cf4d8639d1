//! TOML scene description.
//!
//! A scene file holds an `[image]` table, a `[camera]` table and arrays of
//! `[[lights]]`, `[[ellipsoids]]` and `[[volumes]]`. Vectors and colors are
//! written as arrays (`[x, y, z]`, `[r, g, b, a]`). Volume file paths are
//! resolved relative to the scene file.
//!
//! ```toml
//! [image]
//! width = 320
//! height = 240
//!
//! [camera]
//! position = [0.0, 0.0, -10.0]
//! direction = [0.0, 0.0, 1.0]
//! up = [0.0, 1.0, 0.0]
//! view_plane_width = 4.0
//! view_plane_height = 3.0
//! view_plane_distance = 5.0
//! front_plane_distance = 0.0
//! back_plane_distance = 100.0
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3A;
use log::debug;
use serde::Deserialize;

use crate::camera::Camera;
use crate::colormap::{ColorMap, ColorStop};
use crate::ellipsoid::Ellipsoid;
use crate::error::{Error, Result};
use crate::material::{Color, Light, Material};
use crate::scene::Scene;
use crate::volume::Volume;

fn default_background() -> Color {
    Color::new(0.2, 0.2, 0.2, 1.0)
}

fn default_output() -> PathBuf {
    PathBuf::from("output.png")
}

fn default_scale() -> f32 {
    1.0
}

/// Output image settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color of pixels whose ray hits nothing
    #[serde(default = "default_background")]
    pub background: Color,
    /// Destination file; `.png` or `.exr`
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Camera settings; see [`Camera`] for the meaning of each field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct CameraConfig {
    pub position: Vec3A,
    pub direction: Vec3A,
    pub up: Vec3A,
    pub view_plane_width: f32,
    pub view_plane_height: f32,
    pub view_plane_distance: f32,
    pub front_plane_distance: f32,
    pub back_plane_distance: f32,
}

/// Ellipsoid entry. Without a `material` table, one is derived from `color`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EllipsoidConfig {
    /// World-space center
    pub center: Vec3A,
    /// Per-axis scale factors
    pub semi_axes: Vec3A,
    /// Radius before axis scaling
    pub radius: f32,
    /// Base surface color
    pub color: Color,
    /// Explicit Phong coefficients
    #[serde(default)]
    pub material: Option<Material>,
}

/// Volume entry: header and body files placed at `position`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    /// Text header with `Resolution` and `SliceThickness`
    pub header: PathBuf,
    /// Raw density bytes
    pub body: PathBuf,
    /// World position of the grid's first corner
    pub position: Vec3A,
    /// Uniform scale applied to the voxel size
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Transfer function stops; the built-in CT ramp when empty
    #[serde(default)]
    pub colormap: Vec<ColorStop>,
}

/// Complete scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct SceneConfig {
    pub image: ImageConfig,
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub ellipsoids: Vec<EllipsoidConfig>,
    #[serde(default)]
    pub volumes: Vec<VolumeConfig>,
    /// Directory relative volume paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl SceneConfig {
    /// Parse a scene description; relative paths resolve against `base_dir`.
    pub fn parse(text: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: SceneConfig = toml::from_str(text)?;
        config.base_dir = base_dir.into();
        Ok(config)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(Error::io(path))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = Self::parse(&text, base_dir)?;
        debug!(
            "Scene {}: {} lights, {} ellipsoids, {} volumes",
            path.display(),
            config.lights.len(),
            config.ellipsoids.len(),
            config.volumes.len()
        );
        Ok(config)
    }

    /// Camera described by the `[camera]` table.
    pub fn camera(&self) -> Camera {
        let c = &self.camera;
        Camera::new(
            c.position,
            c.direction,
            c.up,
            c.view_plane_width,
            c.view_plane_height,
            c.view_plane_distance,
            c.front_plane_distance,
            c.back_plane_distance,
        )
    }

    /// Build the scene, loading every volume from disk.
    pub fn build_scene(&self) -> Result<Scene> {
        let mut scene = Scene::new();

        for e in &self.ellipsoids {
            let ellipsoid = match e.material {
                Some(material) => Ellipsoid::new(e.center, e.semi_axes, e.radius, material, e.color),
                None => Ellipsoid::with_color(e.center, e.semi_axes, e.radius, e.color),
            };
            scene.add(Box::new(ellipsoid));
        }

        for v in &self.volumes {
            let colormap = if v.colormap.is_empty() {
                ColorMap::default()
            } else {
                ColorMap::new(v.colormap.clone())
            };
            let volume = Volume::load(
                &self.resolve(&v.header),
                &self.resolve(&v.body),
                v.position,
                v.scale,
                colormap,
            )?;
            scene.add(Box::new(volume));
        }

        for light in &self.lights {
            scene.add_light(*light);
        }

        Ok(scene)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::ray::Ray;

    const SCENE: &str = r#"
        [image]
        width = 64
        height = 48
        output = "out.exr"

        [camera]
        position = [0.0, 0.0, -10.0]
        direction = [0.0, 0.0, 2.0]
        up = [0.0, 1.0, 0.0]
        view_plane_width = 4.0
        view_plane_height = 3.0
        view_plane_distance = 5.0
        front_plane_distance = 0.0
        back_plane_distance = 100.0

        [[lights]]
        position = [5.0, 5.0, -10.0]
        ambient = [0.1, 0.1, 0.1, 1.0]
        diffuse = [1.0, 1.0, 1.0, 1.0]
        specular = [1.0, 1.0, 1.0, 1.0]

        [[ellipsoids]]
        center = [0.0, 0.0, 0.0]
        semi_axes = [1.0, 2.0, 1.0]
        radius = 1.0
        color = [1.0, 0.0, 0.0, 1.0]

        [[ellipsoids]]
        center = [3.0, 0.0, 0.0]
        semi_axes = [1.0, 1.0, 1.0]
        radius = 0.5
        color = [0.0, 1.0, 0.0, 1.0]
        material = { ambient = [0.2, 0.2, 0.2, 1.0], diffuse = [0.5, 0.5, 0.5, 1.0], specular = [1.0, 1.0, 1.0, 1.0], shininess = 50.0 }
    "#;

    #[test]
    fn parses_full_scene() {
        let config = SceneConfig::parse(SCENE, "scenes").unwrap();
        assert_eq!(config.image.width, 64);
        assert_eq!(config.image.output, PathBuf::from("out.exr"));
        assert_eq!(config.image.background, default_background());
        assert_eq!(config.lights.len(), 1);
        assert_eq!(config.ellipsoids.len(), 2);
        assert!(config.ellipsoids[0].material.is_none());
        assert_eq!(config.ellipsoids[1].material.map(|m| m.shininess), Some(50.0));
        assert!(config.volumes.is_empty());
    }

    #[test]
    fn camera_direction_is_normalized() {
        let camera = SceneConfig::parse(SCENE, "").unwrap().camera();
        assert!((camera.direction - Vec3A::Z).length() < 1e-6);
    }

    #[test]
    fn builds_traversable_scene() {
        let config = SceneConfig::parse(SCENE, "").unwrap();
        let scene = config.build_scene().unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.lights.len(), 1);

        let ray = Ray::new(Vec3A::new(0.0, 0.0, -10.0), Vec3A::Z);
        let hit = scene.find_first_intersection(&ray, Interval::new(0.0, 100.0)).unwrap();
        assert_eq!(hit.color, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = SCENE.replace("radius = 0.5", "radius = 0.5\nwobble = 1.0");
        assert!(matches!(SceneConfig::parse(&text, ""), Err(Error::Config(_))));
    }

    #[test]
    fn missing_volume_file_is_an_io_error() {
        let text = format!(
            "{SCENE}\n[[volumes]]\nheader = \"nope.dat\"\nbody = \"nope.raw\"\nposition = [0.0, 0.0, 0.0]\n"
        );
        let config = SceneConfig::parse(&text, "/nonexistent-voxtrace-dir").unwrap();
        assert_eq!(config.volumes[0].scale, 1.0);
        assert!(matches!(config.build_scene(), Err(Error::Io { .. })));
    }
}
