//! Coordinate assignment for syntax trees and automata.
//!
//! Positions are in abstract layout units. Scene builders scale them to
//! pixels.
//!
//! - [`tree`] - deterministic recursive width accumulation
//! - [`force`] - seeded Fruchterman-Reingold spring embedding
//! - [`automaton`] - force layout of automata with a fallback chain

pub mod automaton;
pub mod force;
pub mod tree;

use indexmap::IndexMap;
use thiserror::Error;

use astrolabe_core::geometry::Point;

/// Insertion-ordered mapping from node or state id to its position.
pub type LayoutPosition<K> = IndexMap<K, Point>;

/// Reasons a layout could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("optimal distance must be positive and finite, got {0}")]
    InvalidDistance(f32),

    #[error("spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),

    #[error("embedding diverged: node #{0} has a non-finite coordinate")]
    NonFinite(usize),
}
