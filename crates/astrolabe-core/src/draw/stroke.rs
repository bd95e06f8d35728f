//! Stroke and line-style definitions.
//!
//! Exported types:
//! - [`StrokeDefinition`]: color, width and pattern of a stroked outline
//! - [`StrokeStyle`]: line patterns (solid or dashed)
//! - [`apply_stroke!`](crate::apply_stroke!): macro applying a stroke to an SVG element
//!
//! # Applying to SVG Elements
//!
//! ```
//! use astrolabe_core::draw::StrokeDefinition;
//! use astrolabe_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::dashed(Color::new("dimgray").unwrap(), 1.5);
//! let circle = svg_element::Circle::new().set("r", 10);
//!
//! let circle = astrolabe_core::apply_stroke!(circle, &stroke);
//! ```

use crate::color::Color;

/// Line pattern of a stroke.
///
/// `Solid` has no dasharray attribute; `Dashed` maps to "5,5".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering lines, arcs and outlines.
///
/// # Examples
///
/// ```
/// use astrolabe_core::draw::{StrokeDefinition, StrokeStyle};
/// use astrolabe_core::color::Color;
///
/// let stroke = StrokeDefinition::solid(Color::new("#4169E1").unwrap(), 2.0);
/// assert_eq!(*stroke.style(), StrokeStyle::Solid);
///
/// let loop_stroke = StrokeDefinition::dashed(Color::new("black").unwrap(), 1.5);
/// assert_eq!(loop_stroke.style().to_svg_value(), Some("5,5"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a stroke with the given color, width and pattern.
    pub fn new(color: Color, width: f32, style: StrokeStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width, StrokeStyle::Solid)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width, StrokeStyle::Dashed)
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width and (for non-solid styles) the dash pattern.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
