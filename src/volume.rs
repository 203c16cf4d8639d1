//! Ray-marched volumes sampled from a voxel density grid.
//!
//! A volume is loaded from two files: a text header giving the grid
//! resolution and voxel size, and a raw body holding one density byte per
//! voxel. Rays are clipped against the grid's bounding box, then marched at a
//! fixed step while densities are composited front to back.

use std::ops::ControlFlow;
use std::path::Path;
use std::str::FromStr;

use glam::{IVec3, UVec3, Vec3A};
use log::{debug, info};

use crate::colormap::ColorMap;
use crate::error::{Error, Result};
use crate::geometry::{Geometry, Intersection};
use crate::interval::Interval;
use crate::material::{Color, Material};
use crate::ray::Ray;

/// Distance between consecutive samples along a ray, in world units.
pub const MARCH_STEP: f32 = 0.2;

/// Accumulated opacity at which a ray is considered fully occluded.
pub const OPACITY_CUTOFF: f32 = 0.99;

/// Grid layout read from a volume header file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeHeader {
    /// Voxel count along x, y and z.
    pub resolution: UVec3,
    /// Physical voxel size along each axis, before scaling.
    pub thickness: Vec3A,
}

impl VolumeHeader {
    /// Parse a header from line-oriented `Key: v1 v2 v3` records.
    ///
    /// Keys and values may be separated by any run of colons, tabs or spaces.
    /// `Resolution` and `SliceThickness` are required; other keys are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut resolution = None;
        let mut thickness = None;

        for line in text.lines() {
            let mut fields = line
                .split(|c: char| c == ':' || c == ' ' || c == '\t' || c == '\r')
                .filter(|field| !field.is_empty());

            match fields.next() {
                Some("Resolution") => {
                    resolution = Some(UVec3::from_array(parse_triple("Resolution", fields)?));
                }
                Some("SliceThickness") => {
                    thickness = Some(Vec3A::from_array(parse_triple("SliceThickness", fields)?));
                }
                _ => {}
            }
        }

        Self::validate(resolution, thickness)
    }

    fn validate(resolution: Option<UVec3>, thickness: Option<Vec3A>) -> Result<Self> {
        let resolution = resolution.ok_or_else(|| Error::Header("missing Resolution record".into()))?;
        let thickness = thickness.ok_or_else(|| Error::Header("missing SliceThickness record".into()))?;

        if resolution.min_element() == 0 {
            return Err(Error::Header(format!("resolution {resolution} has an empty axis")));
        }
        if !(thickness.min_element() > 0.0) {
            return Err(Error::Header(format!("slice thickness {thickness} must be positive")));
        }

        let header = Self { resolution, thickness };
        header.voxel_count()?;
        Ok(header)
    }

    /// Number of voxels, and so of body bytes.
    ///
    /// Fails with [`Error::Header`] when the count does not fit in `usize`.
    pub fn voxel_count(&self) -> Result<usize> {
        let UVec3 { x, y, z } = self.resolution;
        (x as usize)
            .checked_mul(y as usize)
            .and_then(|xy| xy.checked_mul(z as usize))
            .ok_or_else(|| Error::Header(format!("resolution {} overflows the voxel count", self.resolution)))
    }
}

fn parse_triple<'a, T: FromStr>(key: &str, fields: impl Iterator<Item = &'a str>) -> Result<[T; 3]> {
    let values = fields
        .take(3)
        .map(|field| {
            field
                .parse::<T>()
                .map_err(|_| Error::Header(format!("{key}: '{field}' is not a valid number")))
        })
        .collect::<Result<Vec<T>>>()?;

    <[T; 3]>::try_from(values).map_err(|_| Error::Header(format!("{key} needs three values")))
}

/// Front-to-back compositing state: premultiplied color and accumulated opacity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Composite {
    /// Accumulated color.
    pub color: Color,
    /// Accumulated opacity in [0, 1].
    pub opacity: f32,
}

impl Composite {
    /// Blend a sample behind everything accumulated so far ("over" operator).
    ///
    /// The sample's alpha is its opacity.
    pub fn over(self, sample: Color) -> Self {
        let alpha = sample.w;
        let transmitted = 1.0 - self.opacity;
        Self {
            color: self.color + sample * alpha * transmitted,
            opacity: self.opacity + transmitted * alpha,
        }
    }
}

/// Composite samples front to back, stopping once opacity reaches [`OPACITY_CUTOFF`].
pub fn composite<I: IntoIterator<Item = Color>>(samples: I) -> Composite {
    let folded = samples.into_iter().try_fold(Composite::default(), |acc, sample| {
        let next = acc.over(sample);
        if next.opacity >= OPACITY_CUTOFF {
            ControlFlow::Break(next)
        } else {
            ControlFlow::Continue(next)
        }
    });

    match folded {
        ControlFlow::Break(done) | ControlFlow::Continue(done) => done,
    }
}

/// Ray parameters sampled across `window`, starting at its near end.
///
/// Each sample is offset from `window.min` by a whole number of steps, so the
/// march ends even where `t + MARCH_STEP` rounds back to `t`.
fn sample_distances(window: Interval) -> impl Iterator<Item = f32> {
    (0u32..)
        .map(move |k| window.min + k as f32 * MARCH_STEP)
        .take_while(move |&t| t <= window.max)
}

/// Voxel density grid placed in world space.
#[derive(Debug, Clone)]
pub struct Volume {
    position: Vec3A,
    scale: f32,
    resolution: UVec3,
    thickness: Vec3A,
    data: Vec<u8>,
    colormap: ColorMap,
    v0: Vec3A,
    v1: Vec3A,
}

impl Volume {
    /// Create a volume from a parsed header and its body bytes.
    ///
    /// Fails with [`Error::DataFormat`] unless `data` has exactly one byte per voxel.
    pub fn new(header: VolumeHeader, data: Vec<u8>, position: Vec3A, scale: f32, colormap: ColorMap) -> Result<Self> {
        let expected = header.voxel_count()?;
        if data.len() != expected {
            return Err(Error::DataFormat { expected, actual: data.len() });
        }

        let extent = header.resolution.as_vec3a() * header.thickness * scale;
        Ok(Self {
            position,
            scale,
            resolution: header.resolution,
            thickness: header.thickness,
            data,
            colormap,
            v0: position,
            v1: position + extent,
        })
    }

    /// Load a volume from its header and body files.
    pub fn load(header_path: &Path, body_path: &Path, position: Vec3A, scale: f32, colormap: ColorMap) -> Result<Self> {
        let header_text = std::fs::read_to_string(header_path).map_err(Error::io(header_path))?;
        let header = VolumeHeader::parse(&header_text)?;

        // Length is checked against the header in `new`
        let data = std::fs::read(body_path).map_err(Error::io(body_path))?;

        let volume = Self::new(header, data, position, scale, colormap)?;
        info!(
            "Loaded volume {} ({}x{}x{} voxels)",
            body_path.display(),
            header.resolution.x,
            header.resolution.y,
            header.resolution.z
        );
        debug!("Volume bounds {} .. {}", volume.v0, volume.v1);
        Ok(volume)
    }

    /// Axis-aligned bounding box corners (v0, v1).
    pub fn bounds(&self) -> (Vec3A, Vec3A) {
        (self.v0, self.v1)
    }

    /// Density at a voxel index; indices outside the grid read as empty space.
    pub fn density(&self, idx: IVec3) -> u8 {
        if idx.cmplt(IVec3::ZERO).any() || idx.as_uvec3().cmpge(self.resolution).any() {
            return 0;
        }
        let (x, y, z) = (idx.x as usize, idx.y as usize, idx.z as usize);
        let (res_x, res_y) = (self.resolution.x as usize, self.resolution.y as usize);
        self.data[z * res_y * res_x + y * res_x + x]
    }

    /// Voxel containing a world-space point.
    pub fn voxel_index(&self, p: Vec3A) -> IVec3 {
        ((p - self.position) / self.thickness / self.scale).floor().as_ivec3()
    }

    /// Central-difference density gradient at a voxel.
    pub fn gradient(&self, idx: IVec3) -> Vec3A {
        let diff = |axis: IVec3| self.density(idx + axis) as f32 - self.density(idx - axis) as f32;
        Vec3A::new(diff(IVec3::X), diff(IVec3::Y), diff(IVec3::Z))
    }

    /// Portion of `range` where the ray is inside the bounding box (slab method).
    fn march_window(&self, r: &Ray, range: Interval) -> Option<Interval> {
        let inv_dir = r.direction.recip();
        let t0 = (self.v0 - r.origin) * inv_dir;
        let t1 = (self.v1 - r.origin) * inv_dir;

        let entry = t0.min(t1).max_element();
        let exit = t0.max(t1).min_element();

        let window = Interval::new(entry, exit).intersect(range);
        (!window.is_empty()).then_some(window)
    }
}

impl Geometry for Volume {
    fn intersect(&self, r: &Ray, range: Interval) -> Option<Intersection> {
        let window = self.march_window(r, range)?;

        let mut occupied = sample_distances(window)
            .map(|t| {
                let idx = self.voxel_index(r.at(t));
                (t, idx, self.density(idx))
            })
            .filter(|&(_, _, density)| density > 0)
            .peekable();

        // The first occupied sample fixes the hit distance and normal
        let &(t, first_voxel, _) = occupied.peek()?;
        let normal = self
            .gradient(first_voxel)
            .try_normalize()
            .unwrap_or_else(|| -r.direction.normalize());

        let accumulated = composite(occupied.map(|(_, _, density)| self.colormap.color_for(density)));

        let position = r.at(t);
        Some(Intersection {
            visible: true,
            geometry: None,
            ray: Ray::new(position, r.direction),
            t,
            position,
            normal,
            material: Material::from_color(accumulated.color),
            color: accumulated.color,
        })
    }

    // Translucent media are shaded through compositing and never shadow other geometry
    fn casts_shadow(&self) -> bool {
        false
    }
}
