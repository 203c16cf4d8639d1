//! voxtrace ray tracer
//!
//! Casts one ray per pixel into a scene of analytic ellipsoids and
//! ray-marched CT volumes, then shades the nearest hit with a Phong model
//! and hard shadows. Outputs PNG and EXR images.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod interval;
pub mod material;
pub mod colormap;
pub mod geometry;
pub mod ellipsoid;
pub mod volume;
pub mod scene;
pub mod shading;
pub mod camera;
pub mod config;
pub mod output;
pub mod error;

pub use error::{Error, Result};
