//! Translation of models and layouts into backend-agnostic scenes.
//!
//! Scene coordinates are pixels with y growing downward. Layout units are
//! scaled by the configured `unit`; font sizes are given in points and
//! converted with the same unit, so a `unit` of 72 maps one point to one pixel.

mod automaton;
mod palette;
mod tree;

pub use automaton::automaton_scene;
pub use palette::{Palette, StateCategory, TreeNodeCategory};
pub use tree::tree_scene;

use thiserror::Error;

use astrolabe_core::{
    color::Color,
    draw::{Directive, Label, LegendEntry, NodeStyle, RenderLayer, Scene, StrokeDefinition, SummaryBox, Text, TextDefinition},
    geometry::{Insets, Point},
};

use crate::config::StyleConfig;

/// Vertical space between stacked header blocks and the content.
const HEADER_GAP: f32 = 16.0;
/// Height of one legend row.
const LEGEND_ROW_HEIGHT: f32 = 22.0;
/// Horizontal offset of legend swatch centers from the content edge.
const LEGEND_INDENT: f32 = 8.0;

/// A model that cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("No root node found in syntax tree.")]
    MissingRoot,

    #[error("No states found in DFA.")]
    NoStates,

    #[error("No start state defined in DFA.")]
    MissingStart,
}

/// Resolved visual settings shared by both scene builders.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    palette: Palette,
    background: Option<Color>,
    unit: f32,
}

impl SceneStyle {
    /// Resolves colors from the style configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured color is invalid or `unit` is not
    /// a positive number.
    pub fn from_config(config: &StyleConfig) -> Result<Self, String> {
        let unit = config.unit();
        if !(unit.is_finite() && unit > 0.0) {
            return Err(format!("Invalid unit in config: {unit}"));
        }
        Ok(Self {
            palette: Palette::from_config(config)?,
            background: config.background_color()?,
            unit,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Pixels per layout unit.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// Text definition of `points` size, scaled to the unit.
    fn text(&self, points: f32, bold: bool) -> TextDefinition {
        let mut text = TextDefinition::new();
        text.set_font_size((points * self.unit / 72.0).round().max(1.0) as u16);
        text.set_bold(bold);
        text
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            background: Some(Color::new("white").expect("white is a valid color")),
            unit: 100.0,
        }
    }
}

/// Title, summary box and legend stacked above the scene content.
///
/// From the content upward: legend rows, then the summary box, then the
/// title, all left-aligned with the content except the centered title.
struct Header<'a> {
    title: String,
    title_text: TextDefinition,
    summary: Option<SummaryBox>,
    legend: Vec<(NodeStyle, &'a str)>,
    legend_text: TextDefinition,
}

impl Header<'_> {
    fn place(self, scene: &mut Scene) {
        let Some(content) = scene.content_bounds() else {
            return;
        };
        let left = content.min_x();
        let mut top = content.min_y() - HEADER_GAP;

        for (style, label) in self.legend.into_iter().rev() {
            scene.push(
                RenderLayer::Overlay,
                Directive::LegendEntry(LegendEntry {
                    position: Point::new(left + LEGEND_INDENT, top - LEGEND_ROW_HEIGHT / 2.0),
                    style,
                    label: label.to_string(),
                    text: self.legend_text.clone(),
                }),
            );
            top -= LEGEND_ROW_HEIGHT;
        }

        if let Some(mut summary) = self.summary {
            top -= HEADER_GAP;
            summary.position = Point::new(left, top - summary.size().height());
            top = summary.position.y();
            scene.push(RenderLayer::Overlay, Directive::SummaryBox(summary));
        }

        let title_height = Text::new(&self.title_text, &self.title)
            .calculate_size()
            .height();
        let title_center = Point::new(content.center().x(), top - HEADER_GAP - title_height / 2.0);
        scene.push(
            RenderLayer::Overlay,
            Directive::Text(Label::new(title_center, self.title, self.title_text)),
        );
    }
}

/// The info box of automaton scenes: a translucent wheat panel.
fn summary_box(lines: Vec<String>, text: TextDefinition) -> SummaryBox {
    let wheat = Color::new("wheat").expect("wheat is a valid color");
    SummaryBox {
        position: Point::default(),
        lines,
        text,
        fill: wheat.with_alpha(0.5),
        stroke: StrokeDefinition::solid(wheat, 1.0),
        padding: Insets::uniform(8.0),
    }
}
