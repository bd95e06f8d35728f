//! Node categories and their colors.

use astrolabe_core::{color::Color, draw::NodeStyle};

use crate::{
    config::{NodeStyleConfig, StyleConfig},
    model::TreeNodeKind,
};

/// Visual category of an automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCategory {
    StartAccepting,
    Start,
    Accepting,
    Plain,
}

impl StateCategory {
    /// Legend order.
    pub const ALL: [StateCategory; 4] = [
        Self::Start,
        Self::Accepting,
        Self::StartAccepting,
        Self::Plain,
    ];

    pub fn classify(is_start: bool, is_accepting: bool) -> Self {
        match (is_start, is_accepting) {
            (true, true) => Self::StartAccepting,
            (true, false) => Self::Start,
            (false, true) => Self::Accepting,
            (false, false) => Self::Plain,
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::StartAccepting => "Start & Accept",
            Self::Start => "Start State",
            Self::Accepting => "Accept State",
            Self::Plain => "Regular State",
        }
    }
}

/// Visual category of a syntax-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeNodeCategory {
    Operator,
    Operand,
}

impl TreeNodeCategory {
    pub const ALL: [TreeNodeCategory; 2] = [Self::Operator, Self::Operand];

    /// Literals and epsilon are both operands.
    pub fn classify(kind: TreeNodeKind) -> Self {
        match kind {
            TreeNodeKind::Operator => Self::Operator,
            TreeNodeKind::Literal | TreeNodeKind::Epsilon => Self::Operand,
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::Operator => "Operators (*, ., |)",
            Self::Operand => "Operands (a-z, ε)",
        }
    }
}

/// Fill and outline colors for every node category.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    start_accepting: NodeStyle,
    start: NodeStyle,
    accepting: NodeStyle,
    plain: NodeStyle,
    operator: NodeStyle,
    operand: NodeStyle,
}

impl Palette {
    /// Builds the palette from the built-in colors and the configured overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured color cannot be parsed.
    pub fn from_config(config: &StyleConfig) -> Result<Self, String> {
        let defaults = Self::default();
        let automaton = config.automaton();
        let tree = config.tree();

        Ok(Self {
            start_accepting: apply(defaults.start_accepting, automaton.start_accepting())?,
            start: apply(defaults.start, automaton.start())?,
            accepting: apply(defaults.accepting, automaton.accepting())?,
            plain: apply(defaults.plain, automaton.plain())?,
            operator: apply(defaults.operator, tree.operator())?,
            operand: apply(defaults.operand, tree.operand())?,
        })
    }

    pub fn state(&self, category: StateCategory) -> NodeStyle {
        match category {
            StateCategory::StartAccepting => self.start_accepting,
            StateCategory::Start => self.start,
            StateCategory::Accepting => self.accepting,
            StateCategory::Plain => self.plain,
        }
    }

    pub fn tree_node(&self, category: TreeNodeCategory) -> NodeStyle {
        match category {
            TreeNodeCategory::Operator => self.operator,
            TreeNodeCategory::Operand => self.operand,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            start_accepting: builtin("#90EE90", "#228B22"),
            start: builtin("#87CEEB", "#4169E1"),
            accepting: builtin("#FFB6C1", "#DC143C"),
            plain: builtin("#F0F0F0", "#696969"),
            operator: builtin("#FFD700", "#FF8C00"),
            operand: builtin("#87CEEB", "#4682B4"),
        }
    }
}

fn builtin(fill: &str, outline: &str) -> NodeStyle {
    NodeStyle::new(
        Color::new(fill).expect("built-in palette colors are valid"),
        Color::new(outline).expect("built-in palette colors are valid"),
    )
}

fn apply(style: NodeStyle, overrides: &NodeStyleConfig) -> Result<NodeStyle, String> {
    Ok(NodeStyle::new(
        overrides.fill()?.unwrap_or(style.fill),
        overrides.outline()?.unwrap_or(style.outline),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_states() {
        assert_eq!(StateCategory::classify(true, true), StateCategory::StartAccepting);
        assert_eq!(StateCategory::classify(true, false), StateCategory::Start);
        assert_eq!(StateCategory::classify(false, true), StateCategory::Accepting);
        assert_eq!(StateCategory::classify(false, false), StateCategory::Plain);
    }

    #[test]
    fn test_classify_tree_nodes() {
        assert_eq!(
            TreeNodeCategory::classify(TreeNodeKind::Epsilon),
            TreeNodeCategory::Operand
        );
        assert_eq!(
            TreeNodeCategory::classify(TreeNodeKind::Operator),
            TreeNodeCategory::Operator
        );
    }

    #[test]
    fn test_default_palette_colors() {
        let palette = Palette::default();
        assert_eq!(
            palette.state(StateCategory::Accepting).fill,
            Color::new("#FFB6C1").unwrap()
        );
        assert_eq!(
            palette.tree_node(TreeNodeCategory::Operator).outline,
            Color::new("#FF8C00").unwrap()
        );
    }

    #[test]
    fn test_from_config_without_overrides_is_default() {
        let palette = Palette::from_config(&StyleConfig::default()).unwrap();
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let config: StyleConfig = toml_like_config();
        let palette = Palette::from_config(&config).unwrap();

        assert_eq!(
            palette.state(StateCategory::Plain).fill,
            Color::new("white").unwrap()
        );
        assert_eq!(
            palette.state(StateCategory::Plain).outline,
            Color::new("#696969").unwrap()
        );
    }

    #[test]
    fn test_from_config_rejects_bad_color() {
        let config: StyleConfig =
            serde_json::from_str(r#"{"tree": {"operand": {"outline": "nope"}}}"#).unwrap();
        let err = Palette::from_config(&config).unwrap_err();
        assert!(err.contains("outline"));
    }

    fn toml_like_config() -> StyleConfig {
        serde_json::from_str(r#"{"automaton": {"plain": {"fill": "white"}}}"#).unwrap()
    }
}
