//! Validated in-memory models built from raw documents.
//!
//! - [`SyntaxTree`] - an index arena of syntax-tree nodes
//! - [`Automaton`] - a state table with merged, render-ready edges

mod automaton;
mod tree;

pub use automaton::{Automaton, MergedEdge, State, Transition, merge_transitions};
pub use tree::{NodeIndex, SyntaxTree, TreeNode, TreeNodeKind};

use thiserror::Error;

use astrolabe_core::identifier::{NodeId, StateId};

/// A document that parsed as JSON but breaks a structural rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("node {id} has value {value:?}, expected exactly one character")]
    InvalidNodeValue { id: NodeId, value: String },

    #[error("duplicate state id {0}")]
    DuplicateState(StateId),

    #[error("start state {0} is not a declared state")]
    UnknownStartState(StateId),

    #[error("transition {from} --{symbol}--> {to} references undeclared state {missing}")]
    DanglingTransition {
        from: StateId,
        symbol: String,
        to: StateId,
        missing: StateId,
    },
}
