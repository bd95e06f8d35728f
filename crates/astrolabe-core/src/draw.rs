//! Drawing primitives for Astrolabe scenes.
//!
//! Scene builders emit backend-agnostic [`Directive`]s collected in a
//! [`Scene`]. Every directive implements [`Drawable`], which reports its
//! bounds and renders it into SVG nodes grouped by [`RenderLayer`].
mod directive;
mod layer;
mod scene;
mod stroke;
mod text;

pub use directive::{
    Arc, Arrow, Circle, Directive, Label, LegendEntry, Line, NodeStyle, SummaryBox,
};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use scene::{Scene, SceneItem};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::Bounds;

/// Something that occupies space in a scene and can render itself to SVG.
pub trait Drawable: std::fmt::Debug {
    /// Renders this element into `layer`.
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput;

    /// Returns the region covered by this element.
    fn bounds(&self) -> Bounds;
}
