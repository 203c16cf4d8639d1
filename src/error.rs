//! Error types for scene loading and image output.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur before or after rendering.
///
/// Rendering itself cannot fail; every variant is raised while loading
/// inputs or writing the image.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Scene file is not valid TOML or does not match the expected layout.
    #[error("invalid scene file: {0}")]
    Config(#[from] toml::de::Error),

    /// Volume header is missing a record or has a malformed value.
    #[error("invalid volume header: {0}")]
    Header(String),

    /// Volume body does not hold one byte per voxel.
    #[error("volume body holds {actual} bytes, expected {expected}")]
    DataFormat {
        /// Voxel count from the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// PNG encoding or writing failed.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or writing failed.
    #[error("failed to write EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// Output path has an extension no writer handles.
    #[error("unsupported output extension '{0}', expected .png or .exr")]
    UnsupportedOutput(String),
}

impl Error {
    /// Adapter for `map_err` that tags an I/O error with the file it came from.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.to_path_buf();
        move |source| Error::Io { path, source }
    }
}

/// Result type for loading and output operations.
pub type Result<T> = std::result::Result<T, Error>;
