//! Typed identifiers for syntax-tree nodes and automaton states.
//!
//! Documents produced upstream number their nodes and states with plain
//! non-negative integers. [`NodeId`] and [`StateId`] wrap those integers so the
//! two id spaces cannot be mixed up, while still serializing transparently as
//! JSON numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in a regular-expression syntax tree.
///
/// # Examples
///
/// ```
/// use astrolabe_core::identifier::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from its numeric value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a state in a finite automaton.
///
/// State ids order numerically, which is the order used when printing the
/// accepting-state set and the transition table.
///
/// # Examples
///
/// ```
/// use astrolabe_core::identifier::StateId;
///
/// assert!(StateId::new(2) < StateId::new(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// Creates a state id from its numeric value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_transparently() {
        let state: StateId = serde_json::from_str("7").unwrap();
        assert_eq!(state, StateId::new(7));
        assert_eq!(serde_json::to_string(&NodeId::new(12)).unwrap(), "12");
    }

    #[test]
    fn test_ids_reject_negative_numbers() {
        let result: Result<StateId, _> = serde_json::from_str("-1");
        assert!(result.is_err());
    }

    #[test]
    fn test_state_id_ordering_is_numeric() {
        let mut ids = vec![StateId::new(10), StateId::new(2), StateId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![StateId::new(1), StateId::new(2), StateId::new(10)]);
    }
}
