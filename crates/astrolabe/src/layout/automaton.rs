//! Automaton layout with fallbacks.

use log::{debug, warn};

use astrolabe_core::identifier::StateId;

use crate::{
    config::AutomatonLayoutConfig,
    layout::{
        LayoutPosition,
        force::{Engine, circular_layout},
    },
    model::Automaton,
};

/// Positions every state of `automaton`.
///
/// The configured spring embedding is tried first, then the unparameterized
/// one with the same seed, then a circular layout. This function therefore
/// always succeeds; failed attempts are logged.
pub fn layout_automaton(
    automaton: &Automaton,
    config: &AutomatonLayoutConfig,
) -> LayoutPosition<StateId> {
    let nodes = automaton.state_ids();
    let edges: Vec<(StateId, StateId)> = automaton
        .edges()
        .iter()
        .map(|edge| (edge.from(), edge.to()))
        .collect();

    let configured = Engine::from_config(config);
    match configured.layout(&nodes, &edges) {
        Ok(positions) => return positions,
        Err(err) => {
            warn!(err:err; "Configured spring layout failed, retrying with defaults");
        }
    }

    match Engine::new(config.seed()).layout(&nodes, &edges) {
        Ok(positions) => positions,
        Err(err) => {
            warn!(err:err; "Default spring layout failed, using circular layout");
            let positions = circular_layout(&nodes);
            debug!(states = positions.len(); "Circular layout complete");
            positions
        }
    }
}
