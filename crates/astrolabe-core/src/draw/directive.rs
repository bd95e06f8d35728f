//! Backend-agnostic draw directives.
//!
//! A [`Directive`] describes one primitive of a scene in absolute scene
//! coordinates (pixels, y growing downward). Directives know their own
//! [`Bounds`] so viewports can be computed without drawing anything, and they
//! can render themselves into SVG through the [`Drawable`] trait. Other
//! backends are free to match on the enum instead.

use std::f32::consts::PI;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

/// Radius of the circular swatch drawn in front of a legend entry.
const LEGEND_SWATCH_RADIUS: f32 = 7.0;
/// Gap between a legend swatch and its label.
const LEGEND_LABEL_GAP: f32 = 8.0;
/// Space between a framed label and its frame.
const LABEL_FRAME_PADDING: f32 = 3.0;

/// Fill and outline colors of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub outline: Color,
}

impl NodeStyle {
    pub fn new(fill: Color, outline: Color) -> Self {
        Self { fill, outline }
    }
}

/// A filled and/or stroked circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: StrokeDefinition,
}

/// An open circular arc.
///
/// Angles are in degrees, measured from the positive x axis. With y growing
/// downward a positive `sweep` runs clockwise on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub sweep: f32,
    pub stroke: StrokeDefinition,
}

impl Arc {
    /// Point on the arc at `angle` degrees.
    pub fn point_at(&self, angle: f32) -> Point {
        let radians = angle * PI / 180.0;
        Point::new(
            self.center.x() + self.radius * radians.cos(),
            self.center.y() + self.radius * radians.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep)
    }
}

/// A quadratic Bézier curve with an arrowhead at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: Point,
    pub control: Point,
    pub to: Point,
    pub stroke: StrokeDefinition,
}

impl Arrow {
    /// Returns the point of the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        self.from
            .scale(u * u)
            .add_point(self.control.scale(2.0 * u * t))
            .add_point(self.to.scale(t * t))
    }

    /// Returns the arrowhead marker id for this arrow's color.
    pub fn marker_id(&self) -> String {
        format!("arrow-{}", self.stroke.color().to_id_safe_string())
    }
}

/// A straight segment without arrowheads.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: StrokeDefinition,
}

/// A text block placed at `position` according to `anchor`.
///
/// A framed label is drawn over a rounded box so it stays readable on top of
/// edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point,
    pub content: String,
    pub text: TextDefinition,
    pub anchor: TextAnchor,
    pub frame: Option<NodeStyle>,
}

impl Label {
    pub fn new(position: Point, content: impl Into<String>, text: TextDefinition) -> Self {
        Self {
            position,
            content: content.into(),
            text,
            anchor: TextAnchor::Middle,
            frame: None,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_frame(mut self, frame: NodeStyle) -> Self {
        self.frame = Some(frame);
        self
    }

    fn text_bounds(&self) -> Bounds {
        Text::new(&self.text, &self.content).bounds_at(self.position, self.anchor)
    }
}

/// One legend row: a colored swatch followed by its caption.
///
/// `position` is the center of the swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub position: Point,
    pub style: NodeStyle,
    pub label: String,
    pub text: TextDefinition,
}

impl LegendEntry {
    fn label_position(&self) -> Point {
        Point::new(
            self.position.x() + LEGEND_SWATCH_RADIUS + LEGEND_LABEL_GAP,
            self.position.y(),
        )
    }
}

/// A framed block of text lines, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBox {
    pub position: Point,
    pub lines: Vec<String>,
    pub text: TextDefinition,
    pub fill: Color,
    pub stroke: StrokeDefinition,
    pub padding: Insets,
}

impl SummaryBox {
    fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn size(&self) -> Size {
        let content = self.content();
        Text::new(&self.text, &content)
            .calculate_size()
            .add_padding(self.padding)
    }
}

/// A single primitive of a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Circle(Circle),
    Arc(Arc),
    Arrow(Arrow),
    Line(Line),
    Text(Label),
    LegendEntry(LegendEntry),
    SummaryBox(SummaryBox),
}

impl Drawable for Circle {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let circle = svg_element::Circle::new()
            .set("cx", self.center.x())
            .set("cy", self.center.y())
            .set("r", self.radius);
        let circle = match self.fill {
            Some(fill) => circle
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => circle.set("fill", "none"),
        };
        let circle = apply_stroke!(circle, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(circle));
        output
    }

    fn bounds(&self) -> Bounds {
        self.center
            .to_bounds(Size::new(self.radius * 2.0, self.radius * 2.0))
    }
}

impl Drawable for Arc {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let start = self.start_point();
        let end = self.end_point();
        let large_arc = u8::from(self.sweep.abs() > 180.0);
        let sweep_flag = u8::from(self.sweep > 0.0);

        let data = format!(
            "M {} {} A {} {} 0 {} {} {} {}",
            start.x(),
            start.y(),
            self.radius,
            self.radius,
            large_arc,
            sweep_flag,
            end.x(),
            end.y()
        );
        let path = svg_element::Path::new().set("d", data).set("fill", "none");
        let path = apply_stroke!(path, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(path));
        output
    }

    // The full circle is a safe superset of any sweep
    fn bounds(&self) -> Bounds {
        self.center
            .to_bounds(Size::new(self.radius * 2.0, self.radius * 2.0))
    }
}

impl Drawable for Arrow {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let data = format!(
            "M {} {} Q {} {}, {} {}",
            self.from.x(),
            self.from.y(),
            self.control.x(),
            self.control.y(),
            self.to.x(),
            self.to.y()
        );
        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("marker-end", format!("url(#{})", self.marker_id()));
        let path = apply_stroke!(path, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(path));
        output
    }

    // The curve lies inside the triangle of its control points
    fn bounds(&self) -> Bounds {
        Bounds::from_point(self.from)
            .merge(&Bounds::from_point(self.control))
            .merge(&Bounds::from_point(self.to))
    }
}

impl Drawable for Line {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let line = svg_element::Line::new()
            .set("x1", self.from.x())
            .set("y1", self.from.y())
            .set("x2", self.to.x())
            .set("y2", self.to.y());
        let line = apply_stroke!(line, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(line));
        output
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_point(self.from).merge(&Bounds::from_point(self.to))
    }
}

impl Drawable for Label {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        if let Some(frame) = self.frame {
            let bounds = self.bounds();
            let rect = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", 4.0)
                .set("fill", frame.fill.to_string())
                .set("fill-opacity", frame.fill.alpha())
                .set("stroke", frame.outline.to_string())
                .set("stroke-width", 1.0);
            output.add_to_layer(layer, Box::new(rect));
        }

        let text = Text::new(&self.text, &self.content).render(self.position, self.anchor);
        output.add_to_layer(layer, Box::new(text));
        output
    }

    fn bounds(&self) -> Bounds {
        match self.frame {
            Some(_) => self
                .text_bounds()
                .add_padding(Insets::uniform(LABEL_FRAME_PADDING)),
            None => self.text_bounds(),
        }
    }
}

impl Drawable for LegendEntry {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let swatch = svg_element::Circle::new()
            .set("cx", self.position.x())
            .set("cy", self.position.y())
            .set("r", LEGEND_SWATCH_RADIUS)
            .set("fill", self.style.fill.to_string())
            .set("stroke", self.style.outline.to_string())
            .set("stroke-width", 1.5);
        let caption = Text::new(&self.text, &self.label).render(self.label_position(), TextAnchor::Start);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(swatch));
        output.add_to_layer(layer, Box::new(caption));
        output
    }

    fn bounds(&self) -> Bounds {
        let swatch = self.position.to_bounds(Size::new(
            LEGEND_SWATCH_RADIUS * 2.0,
            LEGEND_SWATCH_RADIUS * 2.0,
        ));
        let caption = Text::new(&self.text, &self.label).bounds_at(self.label_position(), TextAnchor::Start);
        swatch.merge(&caption)
    }
}

impl Drawable for SummaryBox {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        let size = self.size();
        let frame = svg_element::Rectangle::new()
            .set("x", self.position.x())
            .set("y", self.position.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", 5.0)
            .set("fill", self.fill.to_string())
            .set("fill-opacity", self.fill.alpha());
        let frame = apply_stroke!(frame, &self.stroke);

        let content = self.content();
        let text_position = Point::new(
            self.position.x() + self.padding.left(),
            self.position.y() + self.padding.top() + (size.height() - self.padding.vertical_sum()) / 2.0,
        );
        let text = Text::new(&self.text, &content).render(text_position, TextAnchor::Start);

        let mut output = LayeredOutput::new();
        output.add_to_layer(layer, Box::new(frame));
        output.add_to_layer(layer, Box::new(text));
        output
    }

    fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size())
    }
}

impl Drawable for Directive {
    fn render_to_layers(&self, layer: RenderLayer) -> LayeredOutput {
        match self {
            Self::Circle(circle) => circle.render_to_layers(layer),
            Self::Arc(arc) => arc.render_to_layers(layer),
            Self::Arrow(arrow) => arrow.render_to_layers(layer),
            Self::Line(line) => line.render_to_layers(layer),
            Self::Text(label) => label.render_to_layers(layer),
            Self::LegendEntry(entry) => entry.render_to_layers(layer),
            Self::SummaryBox(summary) => summary.render_to_layers(layer),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Self::Circle(circle) => circle.bounds(),
            Self::Arc(arc) => arc.bounds(),
            Self::Arrow(arrow) => arrow.bounds(),
            Self::Line(line) => line.bounds(),
            Self::Text(label) => label.bounds(),
            Self::LegendEntry(entry) => entry.bounds(),
            Self::SummaryBox(summary) => summary.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn black_stroke() -> StrokeDefinition {
        StrokeDefinition::solid(Color::default(), 1.0)
    }

    fn render(directive: &Directive) -> String {
        directive
            .render_to_layers(RenderLayer::Node)
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_circle_bounds_cover_radius() {
        let circle = Directive::Circle(Circle {
            center: Point::new(10.0, 20.0),
            radius: 5.0,
            fill: None,
            stroke: black_stroke(),
        });
        let bounds = circle.bounds();

        assert_eq!(bounds.min_x(), 5.0);
        assert_eq!(bounds.min_y(), 15.0);
        assert_eq!(bounds.max_x(), 15.0);
        assert_eq!(bounds.max_y(), 25.0);
    }

    #[test]
    fn test_circle_without_fill_renders_none() {
        let rendered = render(&Directive::Circle(Circle {
            center: Point::default(),
            radius: 3.0,
            fill: None,
            stroke: black_stroke(),
        }));
        assert!(rendered.contains("fill=\"none\""));
    }

    #[test]
    fn test_arc_endpoints() {
        let arc = Arc {
            center: Point::new(0.0, 0.0),
            radius: 2.0,
            start_angle: 0.0,
            sweep: 90.0,
            stroke: black_stroke(),
        };

        let start = arc.start_point();
        let end = arc.end_point();
        assert_approx_eq!(f32, start.x(), 2.0, epsilon = 1e-5);
        assert_approx_eq!(f32, start.y(), 0.0, epsilon = 1e-5);
        assert_approx_eq!(f32, end.x(), 0.0, epsilon = 1e-5);
        assert_approx_eq!(f32, end.y(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_arc_large_sweep_uses_large_arc_flag() {
        let rendered = render(&Directive::Arc(Arc {
            center: Point::default(),
            radius: 10.0,
            start_angle: 135.0,
            sweep: 270.0,
            stroke: StrokeDefinition::dashed(Color::default(), 1.0),
        }));

        assert!(rendered.contains(" A 10 10 0 1 1 "));
        assert!(rendered.contains("stroke-dasharray"));
    }

    #[test]
    fn test_arrow_curve_endpoints_and_marker() {
        let arrow = Arrow {
            from: Point::new(0.0, 0.0),
            control: Point::new(5.0, -5.0),
            to: Point::new(10.0, 0.0),
            stroke: StrokeDefinition::solid(Color::new("red").unwrap(), 1.0),
        };

        assert_eq!(arrow.point_at(0.0), arrow.from);
        assert_eq!(arrow.point_at(1.0), arrow.to);
        assert_approx_eq!(f32, arrow.point_at(0.5).y(), -2.5);

        let rendered = render(&Directive::Arrow(arrow.clone()));
        assert!(rendered.contains(&format!("url(#{})", arrow.marker_id())));
        assert!(rendered.contains("Q 5 -5, 10 0"));
    }

    #[test]
    fn test_arrow_bounds_include_control_point() {
        let arrow = Directive::Arrow(Arrow {
            from: Point::new(0.0, 0.0),
            control: Point::new(5.0, -8.0),
            to: Point::new(10.0, 0.0),
            stroke: black_stroke(),
        });
        assert_eq!(arrow.bounds().min_y(), -8.0);
    }

    #[test]
    fn test_line_bounds() {
        let line = Directive::Line(Line {
            from: Point::new(3.0, 9.0),
            to: Point::new(-1.0, 2.0),
            stroke: black_stroke(),
        });
        let bounds = line.bounds();
        assert_eq!(bounds.min_point(), Point::new(-1.0, 2.0));
        assert_eq!(bounds.max_x(), 3.0);
    }

    #[test]
    fn test_label_bounds_follow_anchor() {
        let label = Label::new(Point::new(50.0, 50.0), "a, b", TextDefinition::new());
        let centered = Directive::Text(label.clone()).bounds();
        let started = Directive::Text(label.with_anchor(TextAnchor::Start)).bounds();

        assert!(centered.min_x() < 50.0);
        assert_approx_eq!(f32, started.min_x(), 50.0);
    }

    #[test]
    fn test_framed_label_is_padded_and_drawn_with_box() {
        let frame = NodeStyle::new(Color::new("white").unwrap(), Color::new("gray").unwrap());
        let plain = Label::new(Point::new(0.0, 0.0), "a, b", TextDefinition::new());
        let framed = plain.clone().with_frame(frame);

        let plain_bounds = Directive::Text(plain).bounds();
        let framed_bounds = Directive::Text(framed.clone()).bounds();
        assert_approx_eq!(
            f32,
            framed_bounds.width(),
            plain_bounds.width() + 2.0 * LABEL_FRAME_PADDING,
            epsilon = 0.001
        );

        let rendered = render(&Directive::Text(framed));
        assert!(rendered.contains("<rect"));
        assert!(rendered.contains("a, b"));
    }

    #[test]
    fn test_legend_entry_bounds_cover_swatch_and_caption() {
        let style = NodeStyle::new(Color::new("#87CEEB").unwrap(), Color::new("#4169E1").unwrap());
        let entry = Directive::LegendEntry(LegendEntry {
            position: Point::new(100.0, 10.0),
            style,
            label: "Start State".to_string(),
            text: TextDefinition::new(),
        });

        let bounds = entry.bounds();
        assert_approx_eq!(f32, bounds.min_x(), 100.0 - LEGEND_SWATCH_RADIUS);
        assert!(bounds.max_x() > 100.0 + LEGEND_SWATCH_RADIUS + LEGEND_LABEL_GAP);

        let rendered = render(&entry);
        assert!(rendered.contains("Start State"));
    }

    #[test]
    fn test_summary_box_size_includes_padding() {
        let summary = SummaryBox {
            position: Point::new(0.0, 0.0),
            lines: vec!["Total States: 3".to_string(), "Transitions: 4".to_string()],
            text: TextDefinition::new(),
            fill: Color::new("wheat").unwrap(),
            stroke: black_stroke(),
            padding: Insets::uniform(6.0),
        };
        let text_size = Text::new(&summary.text, "Total States: 3\nTransitions: 4").calculate_size();

        let bounds = Directive::SummaryBox(summary).bounds();
        assert_approx_eq!(f32, bounds.width(), text_size.width() + 12.0, epsilon = 0.001);
        assert_approx_eq!(f32, bounds.height(), text_size.height() + 12.0, epsilon = 0.001);
    }
}
