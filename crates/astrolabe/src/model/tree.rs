//! Syntax tree arena.

use std::collections::HashSet;

use astrolabe_core::identifier::NodeId;

use crate::{
    document::{RawTreeNode, SyntaxTreeDocument},
    model::ModelError,
};

/// Value of an epsilon leaf.
pub const EPSILON: char = 'ε';

/// Operator symbols of the upstream regex grammar.
const OPERATORS: [char; 3] = ['*', '.', '|'];

/// Position of a node inside a [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Classification of a tree node by its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeNodeKind {
    /// One of `*`, `.`, `|`
    Operator,
    /// Any other single character
    Literal,
    /// The empty string, written `ε`
    Epsilon,
}

impl TreeNodeKind {
    pub fn of(value: char) -> Self {
        if value == EPSILON {
            Self::Epsilon
        } else if OPERATORS.contains(&value) {
            Self::Operator
        } else {
            Self::Literal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    id: NodeId,
    value: char,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl TreeNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> char {
        self.value
    }

    pub fn kind(&self) -> TreeNodeKind {
        TreeNodeKind::of(self.value)
    }

    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A regular-expression syntax tree stored as an arena.
///
/// Nodes are stored in preorder, so the root (when present) is always at
/// index 0. The display strings are carried through untouched for reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeIndex>,
    original_regex: Option<String>,
    regex_with_concat: Option<String>,
    postfix: Option<String>,
}

impl SyntaxTree {
    /// Builds the arena from a raw document.
    ///
    /// # Errors
    ///
    /// Fails on duplicate node ids and on values that are not exactly one
    /// character long.
    pub fn from_document(document: SyntaxTreeDocument) -> Result<Self, ModelError> {
        let mut tree = Self {
            nodes: Vec::new(),
            root: None,
            original_regex: document.original_regex,
            regex_with_concat: document.regex_with_concat,
            postfix: document.postfix,
        };

        if let Some(root) = document.root {
            let mut seen = HashSet::new();
            tree.root = Some(tree.insert(root, &mut seen)?);
        }

        Ok(tree)
    }

    fn insert(
        &mut self,
        raw: RawTreeNode,
        seen: &mut HashSet<NodeId>,
    ) -> Result<NodeIndex, ModelError> {
        if !seen.insert(raw.id) {
            return Err(ModelError::DuplicateNode(raw.id));
        }

        let mut chars = raw.value.chars();
        let value = match (chars.next(), chars.next()) {
            (Some(value), None) => value,
            _ => {
                return Err(ModelError::InvalidNodeValue {
                    id: raw.id,
                    value: raw.value,
                });
            }
        };

        let index = NodeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            id: raw.id,
            value,
            left: None,
            right: None,
        });

        let left = raw
            .left
            .map(|child| self.insert(*child, seen))
            .transpose()?;
        let right = raw
            .right
            .map(|child| self.insert(*child, seen))
            .transpose()?;

        let node = &mut self.nodes[index.0];
        node.left = left;
        node.right = right;

        Ok(index)
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns the node at `index`.
    ///
    /// Indices only come from this tree, so they are always in range.
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.0]
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over nodes in preorder.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Iterates over `(parent, child)` pairs, left child first.
    pub fn edges(&self) -> impl Iterator<Item = (&TreeNode, &TreeNode)> {
        self.nodes.iter().flat_map(move |parent| {
            [parent.left, parent.right]
                .into_iter()
                .flatten()
                .map(move |child| (parent, self.node(child)))
        })
    }

    pub fn original_regex(&self) -> &str {
        self.original_regex.as_deref().unwrap_or("N/A")
    }

    pub fn regex_with_concat(&self) -> &str {
        self.regex_with_concat.as_deref().unwrap_or("N/A")
    }

    pub fn postfix(&self) -> &str {
        self.postfix.as_deref().unwrap_or("N/A")
    }
}
