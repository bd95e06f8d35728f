//! Scenes: ordered, layered directive lists with a viewport.

use log::debug;

use crate::{
    color::Color,
    draw::{Directive, Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets},
};

/// A directive tagged with the layer it renders to.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    layer: RenderLayer,
    directive: Directive,
}

impl SceneItem {
    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn directive(&self) -> &Directive {
        &self.directive
    }
}

/// A complete drawing, ready for export.
///
/// Directives keep their insertion order. The viewport is the visible region
/// in scene coordinates.
///
/// # Examples
///
/// ```
/// # use astrolabe_core::draw::{Circle, Directive, RenderLayer, Scene, StrokeDefinition};
/// # use astrolabe_core::geometry::Point;
/// let mut scene = Scene::new(None);
/// scene.push(
///     RenderLayer::Node,
///     Directive::Circle(Circle {
///         center: Point::new(0.0, 0.0),
///         radius: 10.0,
///         fill: None,
///         stroke: StrokeDefinition::default(),
///     }),
/// );
/// scene.fit_viewport(5.0);
///
/// assert_eq!(scene.viewport().width(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    items: Vec<SceneItem>,
    viewport: Bounds,
    background: Option<Color>,
}

impl Scene {
    /// Creates an empty scene with an optional background fill.
    pub fn new(background: Option<Color>) -> Self {
        Self {
            items: Vec::new(),
            viewport: Bounds::default(),
            background,
        }
    }

    pub fn push(&mut self, layer: RenderLayer, directive: Directive) {
        self.items.push(SceneItem { layer, directive });
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Iterates over directives regardless of layer.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.items.iter().map(|item| &item.directive)
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Union of every directive's bounds, or `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.directives()
            .map(Drawable::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Sets the viewport to the content bounds expanded by `margin` on every side.
    pub fn fit_viewport(&mut self, margin: f32) {
        let content = self.content_bounds().unwrap_or_default();
        self.viewport = content.add_padding(Insets::uniform(margin));
        debug!(
            width = self.viewport.width(),
            height = self.viewport.height();
            "Fitted scene viewport"
        );
    }

    /// Renders every directive into its layer.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for item in &self.items {
            output.merge(item.directive.render_to_layers(item.layer));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::{Circle, Line, StrokeDefinition},
        geometry::Point,
    };

    fn circle(x: f32, y: f32, radius: f32) -> Directive {
        Directive::Circle(Circle {
            center: Point::new(x, y),
            radius,
            fill: None,
            stroke: StrokeDefinition::default(),
        })
    }

    #[test]
    fn test_empty_scene_has_no_content_bounds() {
        let mut scene = Scene::new(None);
        assert!(scene.content_bounds().is_none());

        scene.fit_viewport(10.0);
        assert_eq!(scene.viewport().width(), 20.0);
    }

    #[test]
    fn test_fit_viewport_covers_every_directive() {
        let mut scene = Scene::new(Some(Color::new("white").unwrap()));
        scene.push(RenderLayer::Node, circle(0.0, 0.0, 5.0));
        scene.push(RenderLayer::Node, circle(100.0, 40.0, 5.0));
        scene.push(
            RenderLayer::Edge,
            Directive::Line(Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(50.0, -30.0),
                stroke: StrokeDefinition::default(),
            }),
        );
        scene.fit_viewport(10.0);

        let viewport = scene.viewport();
        assert_eq!(viewport.min_x(), -15.0);
        assert_eq!(viewport.min_y(), -40.0);
        assert_eq!(viewport.max_x(), 115.0);
        assert_eq!(viewport.max_y(), 55.0);

        for directive in scene.directives() {
            assert!(viewport.contains_bounds(directive.bounds()));
        }
    }

    #[test]
    fn test_items_keep_insertion_order_and_layer() {
        let mut scene = Scene::new(None);
        scene.push(RenderLayer::Node, circle(1.0, 1.0, 1.0));
        scene.push(RenderLayer::Edge, circle(2.0, 2.0, 1.0));

        let layers: Vec<_> = scene.items().iter().map(SceneItem::layer).collect();
        assert_eq!(layers, vec![RenderLayer::Node, RenderLayer::Edge]);
    }

    #[test]
    fn test_render_to_layers_groups_by_layer() {
        let mut scene = Scene::new(None);
        scene.push(RenderLayer::Node, circle(1.0, 1.0, 1.0));
        scene.push(RenderLayer::Edge, circle(2.0, 2.0, 1.0));
        scene.push(RenderLayer::Node, circle(3.0, 3.0, 1.0));

        let groups = scene.render_to_layers().render();
        assert_eq!(groups.len(), 2);
    }
}
