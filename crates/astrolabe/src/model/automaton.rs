//! Automaton state table and transition aggregation.

use indexmap::{IndexMap, map::Entry};
use log::debug;

use astrolabe_core::identifier::StateId;

use crate::{document::AutomatonDocument, model::ModelError};

/// Separator placed between merged symbols in an edge label.
pub const LABEL_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    id: StateId,
    accepting: bool,
}

impl State {
    pub fn new(id: StateId, accepting: bool) -> Self {
        Self { id, accepting }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

/// One labeled transition exactly as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transition {
    from: StateId,
    symbol: String,
    to: StateId,
}

impl Transition {
    pub fn new(from: StateId, symbol: impl Into<String>, to: StateId) -> Self {
        Self {
            from,
            symbol: symbol.into(),
            to,
        }
    }

    pub fn from(&self) -> StateId {
        self.from
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn to(&self) -> StateId {
        self.to
    }
}

/// All transitions between one ordered pair of states, drawn as a single edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEdge {
    from: StateId,
    to: StateId,
    label: String,
}

impl MergedEdge {
    pub fn from(&self) -> StateId {
        self.from
    }

    pub fn to(&self) -> StateId {
        self.to
    }

    /// Symbols of the label in first-seen order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.label.split(LABEL_SEPARATOR)
    }

    /// Display label, e.g. `"a, b"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Collapses parallel transitions into one edge per ordered `(from, to)` pair.
///
/// Edges appear in the order their pair was first seen. A symbol is appended
/// to an edge label unless it already appears among the label's
/// `", "`-separated parts, so first-seen order is kept and repeats are
/// dropped.
///
/// # Examples
///
/// ```
/// # use astrolabe::model::{Transition, merge_transitions};
/// # use astrolabe::identifier::StateId;
/// let (q0, q1) = (StateId::new(0), StateId::new(1));
/// let edges = merge_transitions(&[
///     Transition::new(q0, "a", q1),
///     Transition::new(q0, "b", q1),
///     Transition::new(q0, "a", q1),
/// ]);
///
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].label(), "a, b");
/// ```
pub fn merge_transitions(transitions: &[Transition]) -> Vec<MergedEdge> {
    let mut merged: IndexMap<(StateId, StateId), String> = IndexMap::new();

    for transition in transitions {
        match merged.entry((transition.from, transition.to)) {
            Entry::Occupied(mut entry) => {
                let label = entry.get_mut();
                if !label
                    .split(LABEL_SEPARATOR)
                    .any(|symbol| symbol == transition.symbol)
                {
                    label.push_str(LABEL_SEPARATOR);
                    label.push_str(&transition.symbol);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(transition.symbol.clone());
            }
        }
    }

    merged
        .into_iter()
        .map(|((from, to), label)| MergedEdge { from, to, label })
        .collect()
}

/// A finite automaton: states, an optional start state, the original
/// transitions and their merged edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Automaton {
    states: IndexMap<StateId, State>,
    start: Option<StateId>,
    transitions: Vec<Transition>,
    edges: Vec<MergedEdge>,
}

impl Automaton {
    /// Builds the model from a raw document.
    ///
    /// # Errors
    ///
    /// Fails on duplicate state ids, on a start state that is not declared and
    /// on transitions whose endpoints are not declared.
    pub fn from_document(document: AutomatonDocument) -> Result<Self, ModelError> {
        let mut states = IndexMap::with_capacity(document.states.len());
        for raw in document.states {
            if states
                .insert(raw.id, State::new(raw.id, raw.accepting))
                .is_some()
            {
                return Err(ModelError::DuplicateState(raw.id));
            }
        }

        if let Some(start) = document.start_state
            && !states.contains_key(&start)
        {
            return Err(ModelError::UnknownStartState(start));
        }

        let mut transitions = Vec::with_capacity(document.transitions.len());
        for raw in document.transitions {
            let missing = [raw.from, raw.to]
                .into_iter()
                .find(|id| !states.contains_key(id));
            if let Some(missing) = missing {
                return Err(ModelError::DanglingTransition {
                    from: raw.from,
                    symbol: raw.symbol,
                    to: raw.to,
                    missing,
                });
            }
            transitions.push(Transition::new(raw.from, raw.symbol, raw.to));
        }

        let edges = merge_transitions(&transitions);
        debug!(
            states = states.len(),
            transitions = transitions.len(),
            edges = edges.len();
            "Automaton model built"
        );

        Ok(Self {
            states,
            start: document.start_state,
            transitions,
            edges,
        })
    }

    /// States in document order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn state_ids(&self) -> Vec<StateId> {
        self.states.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn is_start(&self, id: StateId) -> bool {
        self.start == Some(id)
    }

    /// Ids of accepting states in ascending order.
    pub fn accepting_ids(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self
            .states
            .values()
            .filter(|state| state.is_accepting())
            .map(State::id)
            .collect();
        ids.sort();
        ids
    }

    /// Transitions exactly as loaded, in document order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Merged edges in first-seen order.
    pub fn edges(&self) -> &[MergedEdge] {
        &self.edges
    }
}
