//! SVG backend.

use indexmap::IndexSet;
use log::debug;
use svg::{Document, node::element as svg_element};

use astrolabe_core::{
    color::Color,
    draw::{Directive, Scene},
};

use crate::export::{self, Exporter};

/// Renders scenes as standalone SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct Svg;

impl Svg {
    pub fn new() -> Self {
        Self
    }

    /// Builds the SVG document of `scene`.
    ///
    /// The view box is the scene viewport, so scene coordinates are used
    /// unchanged.
    pub fn render_scene(&self, scene: &Scene) -> Document {
        let viewport = scene.viewport();
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    viewport.min_x(),
                    viewport.min_y(),
                    viewport.width(),
                    viewport.height()
                ),
            )
            .set("width", viewport.width())
            .set("height", viewport.height());

        if let Some(background) = scene.background() {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", viewport.min_x())
                    .set("y", viewport.min_y())
                    .set("width", viewport.width())
                    .set("height", viewport.height())
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        let arrow_colors: IndexSet<Color> = scene
            .directives()
            .filter_map(|directive| match directive {
                Directive::Arrow(arrow) => Some(arrow.stroke.color()),
                _ => None,
            })
            .collect();
        if !arrow_colors.is_empty() {
            doc = doc.add(create_marker_definitions(arrow_colors.iter()));
        }

        for node in scene.render_to_layers().render() {
            doc = doc.add(node);
        }

        debug!(
            width = viewport.width(),
            height = viewport.height(),
            markers = arrow_colors.len();
            "SVG document rendered"
        );
        doc
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene) -> Result<Vec<u8>, export::Error> {
        Ok(self.render_scene(scene).to_string().into_bytes())
    }
}

/// Creates one arrowhead marker per color.
///
/// Marker ids match [`Arrow::marker_id`](astrolabe_core::draw::Arrow::marker_id).
fn create_marker_definitions<'a, I>(colors: I) -> svg_element::Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let mut defs = svg_element::Definitions::new();

    for color in colors {
        let marker = svg_element::Marker::new()
            .set("id", format!("arrow-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string()),
            );
        defs = defs.add(marker);
    }

    defs
}
