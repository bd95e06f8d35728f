//! Syntax tree layout.
//!
//! Nodes are placed by an in-order sweep: a node sits to the right of its
//! whole left subtree, and its right subtree starts one horizontal unit further.
//! Every depth level is one vertical unit lower than its parent (y grows
//! downward), so no two nodes ever share an x coordinate.

use indexmap::IndexMap;
use log::debug;

use astrolabe_core::{geometry::Point, identifier::NodeId};

use crate::{
    config::TreeLayoutConfig,
    layout::{LayoutError, LayoutPosition},
    model::{NodeIndex, SyntaxTree},
};

/// Result of laying out a syntax tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLayout {
    positions: LayoutPosition<NodeId>,
    depths: IndexMap<NodeId, usize>,
    width: f32,
}

impl TreeLayout {
    /// Node positions, in in-order (left subtree, node, right subtree).
    pub fn positions(&self) -> &LayoutPosition<NodeId> {
        &self.positions
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Depth of a node; the root has depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// Total horizontal extent reserved by the tree.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Lays out `tree` with its root at the origin.
///
/// An empty tree yields an empty layout of width 0.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidSpacing`] when a spacing is not a positive
/// finite number.
pub fn layout_tree(
    tree: &SyntaxTree,
    config: &TreeLayoutConfig,
) -> Result<TreeLayout, LayoutError> {
    let spacing = Spacing::new(config.horizontal_spacing(), config.vertical_spacing())?;

    let mut layout = TreeLayout::default();
    layout.width = place_subtree(
        tree,
        tree.root(),
        Point::default(),
        0,
        spacing,
        &mut layout,
    );

    debug!(nodes = layout.positions.len(), width = layout.width; "Tree layout complete");
    Ok(layout)
}

#[derive(Debug, Clone, Copy)]
struct Spacing {
    horizontal: f32,
    vertical: f32,
}

impl Spacing {
    fn new(horizontal: f32, vertical: f32) -> Result<Self, LayoutError> {
        for value in [horizontal, vertical] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidSpacing(value));
            }
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }
}

/// Places the subtree rooted at `index` with its left edge at `anchor.x`,
/// returning the width it occupies.
fn place_subtree(
    tree: &SyntaxTree,
    index: Option<NodeIndex>,
    anchor: Point,
    depth: usize,
    spacing: Spacing,
    layout: &mut TreeLayout,
) -> f32 {
    let Some(index) = index else {
        return 0.0;
    };
    let node = tree.node(index);
    let child_y = anchor.y() + spacing.vertical;

    let left_width = place_subtree(
        tree,
        node.left(),
        anchor.with_y(child_y),
        depth + 1,
        spacing,
        layout,
    );

    let current = anchor.with_x(anchor.x() + left_width);
    layout.positions.insert(node.id(), current);
    layout.depths.insert(node.id(), depth);

    let right_width = place_subtree(
        tree,
        node.right(),
        Point::new(current.x() + spacing.horizontal, child_y),
        depth + 1,
        spacing,
        layout,
    );

    left_width + spacing.horizontal + right_width
}
