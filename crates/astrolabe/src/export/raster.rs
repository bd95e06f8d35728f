//! PNG backend, rasterizing the SVG output with resvg.

use log::debug;

use astrolabe_core::draw::Scene;

use crate::export::{self, Exporter, svg::Svg};

/// Renders scenes as PNG images.
#[derive(Debug, Clone, Copy)]
pub struct Png {
    scale: f32,
}

impl Png {
    /// Creates a backend that multiplies the pixel size of the image by `scale`.
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for Png {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Exporter for Png {
    fn export_scene(&self, scene: &Scene) -> Result<Vec<u8>, export::Error> {
        let svg = Svg::new().render_scene(scene).to_string();
        svg_to_png(&svg, self.scale)
    }
}

/// Rasterizes an SVG document at `scale` and encodes it as PNG.
///
/// # Errors
///
/// Fails when `scale` is not positive, the SVG cannot be parsed, or the
/// image is empty or too large to allocate.
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, export::Error> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(export::Error::Raster(format!("invalid scale {scale}")));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|err| export::Error::Raster(format!("failed to parse SVG: {err}")))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        export::Error::Raster(format!("failed to allocate a {width}x{height} pixmap"))
    })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    debug!(width, height, scale; "Scene rasterized");

    pixmap
        .encode_png()
        .map_err(|err| export::Error::Raster(format!("failed to encode PNG: {err}")))
}
