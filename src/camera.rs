//! Camera for ray generation and scene rendering

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::interval::Interval;
use crate::material::Color;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shading::shade;

/// Linear HDR image produced by [`Camera::render`].
pub type Frame = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Pinhole camera looking through a rectangular view plane.
///
/// Primary rays start at `position` and pass through points on a plane at
/// `view_plane_distance` along `direction`. Only hits between the front and
/// back plane distances are rendered.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3A,
    /// Unit viewing direction
    pub direction: Vec3A,
    /// Unit up vector; also the vertical axis of the view plane
    pub up: Vec3A,
    /// Physical width of the view plane
    pub view_plane_width: f32,
    /// Physical height of the view plane
    pub view_plane_height: f32,
    /// Distance from the eye to the view plane
    pub view_plane_distance: f32,
    /// Nearest accepted hit distance
    pub front_plane_distance: f32,
    /// Farthest accepted hit distance
    pub back_plane_distance: f32,
}

/// Signed offset of pixel `n` from the view-plane center.
///
/// Pixel 0 maps to `+size/2`, increasing pixel indices move towards `-size/2`.
fn image_to_view_plane(n: u32, image_size: u32, view_plane_size: f32) -> f32 {
    -(n as f32) * view_plane_size / image_size as f32 + view_plane_size / 2.0
}

impl Camera {
    /// Create a camera; `direction` and `up` are normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec3A,
        direction: Vec3A,
        up: Vec3A,
        view_plane_width: f32,
        view_plane_height: f32,
        view_plane_distance: f32,
        front_plane_distance: f32,
        back_plane_distance: f32,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            up: up.normalize(),
            view_plane_width,
            view_plane_height,
            view_plane_distance,
            front_plane_distance,
            back_plane_distance,
        }
    }

    /// Horizontal axis of the view plane: `normalize(up × direction)`.
    pub fn right(&self) -> Vec3A {
        self.up.cross(self.direction).normalize()
    }

    /// World-space point on the view plane for pixel `(i, j)` of a `width`×`height` image.
    pub fn view_plane_point(&self, i: u32, j: u32, width: u32, height: u32) -> Vec3A {
        self.position
            + self.direction * self.view_plane_distance
            + self.right() * image_to_view_plane(i, width, self.view_plane_width)
            + self.up * image_to_view_plane(j, height, self.view_plane_height)
    }

    /// Primary ray through pixel `(i, j)`.
    pub fn ray_for_pixel(&self, i: u32, j: u32, width: u32, height: u32) -> Ray {
        Ray::through(self.position, self.view_plane_point(i, j, width, height))
    }

    /// Range of hit distances primary rays accept.
    pub fn clip_range(&self) -> Interval {
        Interval::new(self.front_plane_distance, self.back_plane_distance)
    }

    /// Color seen through pixel `(i, j)`; `background` when nothing is hit.
    pub fn trace_pixel(&self, scene: &Scene, i: u32, j: u32, width: u32, height: u32, background: Color) -> Color {
        let ray = self.ray_for_pixel(i, j, width, height);
        match scene.find_first_intersection(&ray, self.clip_range()) {
            Some(hit) => shade(scene, &hit, self.position),
            None => background,
        }
    }

    /// Renders the scene with one primary ray per pixel.
    ///
    /// Pixels are traced one scanline at a time on the calling thread.
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&self, scene: &Scene, width: u32, height: u32, background: Color) -> Frame {
        let mut image = Frame::new(width, height);

        info!("Tracing {}x{} image against {} geometries", width, height, scene.len());
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(height as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} scanlines ETA: {eta}") {
            pb.set_style(style);
        }

        for j in 0..height {
            for i in 0..width {
                let color = self.trace_pixel(scene, i, j, width, height, background);
                image.put_pixel(i, j, Rgb([color.x, color.y, color.z]));
            }
            pb.inc(1);
        }

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}
