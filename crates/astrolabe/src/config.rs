//! Configuration types for Astrolabe rendering.
//!
//! All types implement [`serde::Deserialize`]; every field has a default, so an
//! empty document (or no document at all) yields the stock settings.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and export settings.
//! - [`LayoutConfig`] - Spacing of the tree layout and parameters of the force layout.
//! - [`StyleConfig`] - Background, scale and per-category node colors.
//! - [`ExportConfig`] - Raster export settings.
//!
//! # Example
//!
//! ```
//! # use astrolabe::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().automaton().seed(), 42);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use astrolabe_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig, export: ExportConfig) -> Self {
        Self {
            layout,
            style,
            export,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Layout settings for both pipelines.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    tree: TreeLayoutConfig,

    #[serde(default)]
    automaton: AutomatonLayoutConfig,
}

impl LayoutConfig {
    pub fn new(tree: TreeLayoutConfig, automaton: AutomatonLayoutConfig) -> Self {
        Self { tree, automaton }
    }

    pub fn tree(&self) -> &TreeLayoutConfig {
        &self.tree
    }

    pub fn automaton(&self) -> &AutomatonLayoutConfig {
        &self.automaton
    }
}

/// Spacing of the syntax-tree layout, in layout units.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeLayoutConfig {
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl TreeLayoutConfig {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
        }
    }

    /// Horizontal distance between in-order neighbours.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Vertical distance between depth levels.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self::new(1.5, 1.2)
    }
}

/// Parameters of the force-directed automaton layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutomatonLayoutConfig {
    iterations: u32,
    optimal_distance: f32,
    seed: u64,
    threshold: f32,
}

impl AutomatonLayoutConfig {
    pub fn new(iterations: u32, optimal_distance: f32, seed: u64, threshold: f32) -> Self {
        Self {
            iterations,
            optimal_distance,
            seed,
            threshold,
        }
    }

    /// Maximum number of simulation steps.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Preferred distance `k` between adjacent states.
    pub fn optimal_distance(&self) -> f32 {
        self.optimal_distance
    }

    /// Seed of the random initial placement.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mean displacement below which the simulation stops early.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for AutomatonLayoutConfig {
    fn default() -> Self {
        Self::new(50, 2.5, 42, 1e-4)
    }
}

/// Fill and outline override for one node category.
///
/// Unset colors keep the built-in palette entry.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NodeStyleConfig {
    #[serde(default)]
    fill: Option<String>,

    #[serde(default)]
    outline: Option<String>,
}

impl NodeStyleConfig {
    pub fn new(fill: Option<String>, outline: Option<String>) -> Self {
        Self { fill, outline }
    }

    /// Returns the parsed fill color, if configured.
    pub fn fill(&self) -> Result<Option<Color>, String> {
        parse_color(self.fill.as_deref(), "fill")
    }

    /// Returns the parsed outline color, if configured.
    pub fn outline(&self) -> Result<Option<Color>, String> {
        parse_color(self.outline.as_deref(), "outline")
    }
}

/// Node color overrides for automaton scenes.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AutomatonStyleConfig {
    start_accepting: NodeStyleConfig,
    start: NodeStyleConfig,
    accepting: NodeStyleConfig,
    plain: NodeStyleConfig,
}

impl AutomatonStyleConfig {
    pub fn start_accepting(&self) -> &NodeStyleConfig {
        &self.start_accepting
    }

    pub fn start(&self) -> &NodeStyleConfig {
        &self.start
    }

    pub fn accepting(&self) -> &NodeStyleConfig {
        &self.accepting
    }

    pub fn plain(&self) -> &NodeStyleConfig {
        &self.plain
    }
}

/// Node color overrides for syntax-tree scenes.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TreeStyleConfig {
    operator: NodeStyleConfig,
    operand: NodeStyleConfig,
}

impl TreeStyleConfig {
    pub fn operator(&self) -> &NodeStyleConfig {
        &self.operator
    }

    pub fn operand(&self) -> &NodeStyleConfig {
        &self.operand
    }
}

/// Visual styling configuration for rendered scenes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color of the canvas, as a color string.
    background_color: Option<String>,

    /// Pixels per layout unit.
    unit: f32,

    automaton: AutomatonStyleConfig,

    tree: TreeStyleConfig,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    pub fn with_background_color(mut self, color: Option<String>) -> Self {
        self.background_color = color;
        self
    }

    /// Pixels per layout unit.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn with_unit(mut self, unit: f32) -> Self {
        self.unit = unit;
        self
    }

    pub fn automaton(&self) -> &AutomatonStyleConfig {
        &self.automaton
    }

    pub fn tree(&self) -> &TreeStyleConfig {
        &self.tree
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: Some("white".to_string()),
            unit: 100.0,
            automaton: AutomatonStyleConfig::default(),
            tree: TreeStyleConfig::default(),
        }
    }
}

/// Settings applied when writing images.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Raster resolution multiplier; `2.0` doubles the pixel size of PNG output.
    scale: f32,
}

impl ExportConfig {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn parse_color(value: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_approx_eq!(f32, config.layout().tree().horizontal_spacing(), 1.5);
        assert_approx_eq!(f32, config.layout().tree().vertical_spacing(), 1.2);
        assert_eq!(config.layout().automaton().iterations(), 50);
        assert_approx_eq!(f32, config.layout().automaton().optimal_distance(), 2.5);
        assert_eq!(config.layout().automaton().seed(), 42);
        assert_approx_eq!(f32, config.style().unit(), 100.0);
        assert_approx_eq!(f32, config.export().scale(), 1.0);
        assert_eq!(
            config.style().background_color().unwrap(),
            Some(Color::new("white").unwrap())
        );
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::default().with_background_color(Some("bogus".to_string()));
        let err = style.background_color().unwrap_err();
        assert!(err.contains("Invalid background color"));
    }

    #[test]
    fn test_node_style_config_parses_colors() {
        let style = NodeStyleConfig::new(Some("#90EE90".to_string()), None);
        assert!(style.fill().unwrap().is_some());
        assert!(style.outline().unwrap().is_none());

        let broken = NodeStyleConfig::new(None, Some("#zzz".to_string()));
        assert!(broken.outline().unwrap_err().contains("outline"));
    }

    #[test]
    fn test_missing_background_is_none() {
        let style = StyleConfig::default().with_background_color(None);
        assert_eq!(style.background_color().unwrap(), None);
    }
}
