//! Layer-based z-ordering for SVG output.
//!
//! Every scene directive is tagged with a [`RenderLayer`]. When a scene is
//! exported, [`LayeredOutput`] collects the produced SVG nodes and emits them
//! grouped by layer, bottom to top, so edges never paint over nodes and labels
//! always stay readable.
//!
//! # Example
//!
//! ```
//! # use astrolabe_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Circle, Text};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("q0")));
//! output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
//!
//! // Node group first, then Label group
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers of a scene.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill - renders first
    Background,
    /// Tree edges, transition arrows and self-loop arcs
    Edge,
    /// State and tree-node circles, including accepting rings
    Node,
    /// Node values and transition labels
    Label,
    /// Title, legend and summary box
    Overlay,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Edge => "edge",
            Self::Node => "node",
            Self::Label => "label",
            Self::Overlay => "overlay",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes keep the order they were added in within a layer. Rendering sorts
/// stably by layer, so directive order is preserved inside each group.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            let group = match current.take() {
                Some((current_layer, group)) if current_layer == layer => group,
                Some((_, finished)) => {
                    result.push(Box::new(finished) as SvgNode);
                    svg_element::Group::new().set("data-layer", layer.name())
                }
                None => svg_element::Group::new().set("data-layer", layer.name()),
            };
            current = Some((layer, group.add(node)));
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group) as SvgNode);
        }

        result
    }
}
