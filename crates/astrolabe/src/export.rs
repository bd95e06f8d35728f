//! Export of scenes to image formats.
//!
//! This is the final stage of both pipelines:
//!
//! ```text
//! JSON document
//!     ↓ load + build
//! Model
//!     ↓ layout
//! Positions
//!     ↓ scene
//! Scene (draw directives)
//!     ↓ export (this module)
//! SVG / PNG bytes
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG documents via the `svg` crate
//! - [`raster`] - PNG images rasterized from the SVG output

pub mod raster;
pub mod svg;

use std::path::Path;

use astrolabe_core::draw::Scene;

/// Abstraction over image backends.
pub trait Exporter {
    /// Encodes `scene` into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Raster`] if the scene cannot be
    /// converted.
    fn export_scene(&self, scene: &Scene) -> Result<Vec<u8>, Error>;
}

/// Output image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    Svg,
    #[default]
    Png,
}

impl Format {
    /// Picks the format from a file extension: `.svg` (any case) is SVG,
    /// everything else is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// Errors that can occur during export.
///
/// Converted into [`AstrolabeError::Export`](crate::AstrolabeError::Export)
/// at the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// The SVG document could not be rasterized.
    Raster(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raster(msg) => write!(f, "Raster error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
