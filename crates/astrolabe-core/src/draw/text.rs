//! Text styling and measurement for scene labels.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - Content paired with a [`TextDefinition`], measurable and renderable
//! - [`TextAnchor`] - Horizontal alignment of a text block around its position
//!
//! Label sizes feed into viewport computation, so measurement uses real font
//! metrics through `cosmic-text`. The font system is loaded once per process and
//! shared. When no usable font is installed, sizes fall back to an estimate based
//! on character count.
//!
//! ```
//! # use astrolabe_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//!
//! let text = Text::new(&style, "a, b");
//! let size = text.calculate_size();
//! assert!(size.width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::{debug, info};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::geometry::{Bounds, Point, Size};

/// Horizontal alignment of a text block relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// The position is the left edge of the block
    Start,
    /// The position is the center of the block
    #[default]
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Defines the visual style for text elements.
///
/// Labels are always set in the generic `sans-serif` family with the SVG
/// default fill.
///
/// | Property | Default |
/// |----------|---------|
/// | Font size | `12` |
/// | Bold | `false` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDefinition {
    font_size: u16,
    bold: bool,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn bold(&self) -> bool {
        self.bold
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_size: 12,
            bold: false,
        }
    }
}

const FONT_FAMILY: &str = "sans-serif";

/// A measurable and renderable text element.
///
/// Content may span several lines separated by `\n`; each line becomes its
/// own `<tspan>` when rendered.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the size required to display this text.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Returns the box covered by this text when placed at `position`.
    pub fn bounds_at(&self, position: Point, anchor: TextAnchor) -> Bounds {
        let size = self.calculate_size();
        match anchor {
            TextAnchor::Middle => position.to_bounds(size),
            TextAnchor::Start => Bounds::new_from_top_left(
                Point::new(position.x(), position.y() - size.height() / 2.0),
                size,
            ),
        }
    }

    /// Renders the text as an SVG `<text>` element.
    ///
    /// The block is vertically centered on `position.y`; `anchor` decides how it
    /// sits horizontally around `position.x`.
    pub fn render(&self, position: Point, anchor: TextAnchor) -> svg_element::Text {
        let lines: Vec<&str> = self.content.lines().collect();

        let text_size = self.calculate_size();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            text_size.height() / lines.len() as f32
        };
        let y_offset = -(text_size.height() + line_height) / 2.0;
        let x = position.x();

        let mut rendered = svg_element::Text::new("")
            .set("x", x)
            .set("y", position.y() + y_offset)
            .set("text-anchor", anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", self.definition.font_size());

        if self.definition.bold() {
            rendered = rendered.set("font-weight", "bold");
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        rendered
    }
}

/// Owns the shared `FontSystem` used for text measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` in pixels using shaped glyph runs.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if text_def.bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new().family(Family::SansSerif).weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width > 0.0 {
            return Size::new(max_width, total_height);
        }

        // No glyphs were shaped, most likely because no font is installed
        debug!(text; "Estimating text size without font metrics");
        let line_count = text.lines().count().max(1);
        let longest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or_default();
        Size::new(
            longest as f32 * font_size_px * 0.55,
            line_count as f32 * line_height,
        )
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
