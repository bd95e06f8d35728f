//! Force-directed graph layout engine
//!
//! This module implements the Fruchterman-Reingold spring embedding. Nodes
//! repel each other, adjacent nodes attract, and a linearly cooling
//! temperature caps how far any node may move in one step.

use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use astrolabe_core::geometry::Point;

use crate::{
    config::AutomatonLayoutConfig,
    layout::{LayoutError, LayoutPosition},
};

/// Smallest distance used when computing forces, so coincident nodes still
/// push each other apart.
const MIN_DISTANCE: f64 = 0.01;

/// Iteration count of the unparameterized embedding.
const DEFAULT_ITERATIONS: u32 = 50;

/// Convergence threshold of the unparameterized embedding.
const DEFAULT_THRESHOLD: f64 = 1e-4;

/// Spring embedding engine
///
/// The engine is deterministic: the same nodes, edges and seed always give
/// the same coordinates.
#[derive(Debug, Clone)]
pub struct Engine {
    iterations: u32,
    // None means sqrt(1 / n)
    optimal_distance: Option<f32>,
    seed: u64,
    threshold: f64,
}

impl Engine {
    /// Create an engine with the unparameterized defaults and the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            optimal_distance: None,
            seed,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create an engine from the user configuration
    pub fn from_config(config: &AutomatonLayoutConfig) -> Self {
        let mut engine = Self::new(config.seed());
        engine
            .set_iterations(config.iterations())
            .set_optimal_distance(Some(config.optimal_distance()))
            .set_threshold(f64::from(config.threshold()));
        engine
    }

    /// Set the maximum number of simulation steps
    pub fn set_iterations(&mut self, iterations: u32) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the preferred distance between adjacent nodes
    pub fn set_optimal_distance(&mut self, distance: Option<f32>) -> &mut Self {
        self.optimal_distance = distance;
        self
    }

    /// Set the mean step length below which the simulation stops
    pub fn set_threshold(&mut self, threshold: f64) -> &mut Self {
        self.threshold = threshold;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Embeds `nodes` in the plane.
    ///
    /// Edges are treated as undirected; self-loops and edges naming unknown
    /// nodes have no effect. The result is centred on the origin and scaled
    /// so its largest absolute coordinate is 1.
    ///
    /// # Errors
    ///
    /// Returns an error for zero iterations, for a non-positive or
    /// non-finite optimal distance and when a coordinate becomes non-finite.
    pub fn layout<K>(&self, nodes: &[K], edges: &[(K, K)]) -> Result<LayoutPosition<K>, LayoutError>
    where
        K: Copy + Eq + Hash,
    {
        if self.iterations == 0 {
            return Err(LayoutError::ZeroIterations);
        }
        if let Some(k) = self.optimal_distance
            && !(k.is_finite() && k > 0.0)
        {
            return Err(LayoutError::InvalidDistance(k));
        }

        let index: IndexMap<K, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (*node, i))
            .collect();
        let count = index.len();

        match count {
            0 => return Ok(LayoutPosition::new()),
            1 => return Ok(index.keys().map(|key| (*key, Point::default())).collect()),
            _ => {}
        }

        let mut adjacency = vec![vec![false; count]; count];
        for (from, to) in edges {
            if let (Some(&i), Some(&j)) = (index.get(from), index.get(to))
                && i != j
            {
                adjacency[i][j] = true;
                adjacency[j][i] = true;
            }
        }

        let k = self
            .optimal_distance
            .map_or_else(|| (1.0 / count as f64).sqrt(), f64::from);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut positions: Vec<[f64; 2]> = (0..count)
            .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
            .collect();

        let mut temperature = 0.1 * max_extent(&positions);
        let cooling = temperature / (f64::from(self.iterations) + 1.0);

        let mut steps_taken = 0;
        for _ in 0..self.iterations {
            steps_taken += 1;
            let mut moved = 0.0;
            let displacement = self.displacement(&positions, &adjacency, k);

            for (position, [dx, dy]) in positions.iter_mut().zip(displacement) {
                let length = dx.hypot(dy).max(MIN_DISTANCE);
                let step = [dx * temperature / length, dy * temperature / length];
                position[0] += step[0];
                position[1] += step[1];
                moved += step[0] * step[0] + step[1] * step[1];
            }

            temperature -= cooling;
            if moved.sqrt() / (count as f64) < self.threshold {
                break;
            }
        }

        rescale(&mut positions);

        let mut result = LayoutPosition::with_capacity(count);
        for (i, (key, [x, y])) in index.keys().zip(positions).enumerate() {
            let point = Point::new(x as f32, y as f32);
            if !point.is_finite() {
                return Err(LayoutError::NonFinite(i));
            }
            result.insert(*key, point);
        }

        debug!(nodes = count, iterations = steps_taken, k; "Spring layout complete");
        Ok(result)
    }

    /// Net force on every node: `k²/d` repulsion from every other node plus
    /// `d²/k` attraction towards adjacent ones.
    fn displacement(&self, positions: &[[f64; 2]], adjacency: &[Vec<bool>], k: f64) -> Vec<[f64; 2]> {
        positions
            .iter()
            .enumerate()
            .map(|(i, pi)| {
                let mut total = [0.0, 0.0];
                for (j, pj) in positions.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let delta = [pi[0] - pj[0], pi[1] - pj[1]];
                    let distance = delta[0].hypot(delta[1]).max(MIN_DISTANCE);
                    let attraction = if adjacency[i][j] { distance / k } else { 0.0 };
                    let factor = k * k / (distance * distance) - attraction;
                    total[0] += delta[0] * factor;
                    total[1] += delta[1] * factor;
                }
                total
            })
            .collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&AutomatonLayoutConfig::default())
    }
}

/// Places `nodes` evenly on the unit circle, starting at angle 0.
///
/// A single node sits at the origin.
pub fn circular_layout<K>(nodes: &[K]) -> LayoutPosition<K>
where
    K: Copy + Eq + Hash,
{
    if let [only] = nodes {
        return LayoutPosition::from([(*only, Point::default())]);
    }

    let count = nodes.len() as f32;
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let theta = std::f32::consts::TAU * i as f32 / count;
            (*node, Point::new(theta.cos(), theta.sin()))
        })
        .collect()
}

fn max_extent(positions: &[[f64; 2]]) -> f64 {
    (0..2)
        .map(|axis| {
            let (min, max) = positions.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), position| (min.min(position[axis]), max.max(position[axis])),
            );
            max - min
        })
        .fold(0.0, f64::max)
}

/// Centres positions on the origin and scales the largest absolute
/// coordinate to 1.
fn rescale(positions: &mut [[f64; 2]]) {
    let count = positions.len() as f64;
    for axis in 0..2 {
        let mean = positions.iter().map(|position| position[axis]).sum::<f64>() / count;
        for position in positions.iter_mut() {
            position[axis] -= mean;
        }
    }

    let limit = positions
        .iter()
        .flat_map(|position| position.iter().map(|value| value.abs()))
        .fold(0.0, f64::max);
    if limit > 0.0 {
        for position in positions.iter_mut() {
            position[0] /= limit;
            position[1] /= limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn triangle() -> (Vec<u32>, Vec<(u32, u32)>) {
        (vec![0, 1, 2], vec![(0, 1), (1, 2), (2, 0), (1, 1)])
    }

    #[test]
    fn test_empty_graph() {
        let positions = Engine::default().layout::<u32>(&[], &[]).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_single_node_at_origin() {
        let positions = Engine::default().layout(&[7u32], &[(7, 7)]).unwrap();
        assert_eq!(positions.get(&7), Some(&Point::default()));
    }

    #[test]
    fn test_reproducible_for_same_seed() {
        let (nodes, edges) = triangle();
        let first = Engine::default().layout(&nodes, &edges).unwrap();
        let second = Engine::default().layout(&nodes, &edges).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_changes_layout() {
        let (nodes, edges) = triangle();
        let first = Engine::new(1).layout(&nodes, &edges).unwrap();
        let second = Engine::new(2).layout(&nodes, &edges).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_result_is_normalized() {
        let nodes: Vec<u32> = (0..6).collect();
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];
        let positions = Engine::default().layout(&nodes, &edges).unwrap();

        assert_eq!(positions.len(), 6);
        let keys: Vec<u32> = positions.keys().copied().collect();
        assert_eq!(keys, nodes);

        let max_abs = positions
            .values()
            .flat_map(|p| [p.x().abs(), p.y().abs()])
            .fold(0.0f32, f32::max);
        assert!(approx_eq!(f32, max_abs, 1.0, epsilon = 1e-5));

        let mean_x: f32 = positions.values().map(|p| p.x()).sum::<f32>() / 6.0;
        assert!(mean_x.abs() < 1e-5);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let (nodes, edges) = triangle();

        let mut engine = Engine::default();
        engine.set_iterations(0);
        assert_eq!(
            engine.layout(&nodes, &edges).unwrap_err(),
            LayoutError::ZeroIterations
        );

        let mut engine = Engine::default();
        engine.set_optimal_distance(Some(-1.0));
        assert_eq!(
            engine.layout(&nodes, &edges).unwrap_err(),
            LayoutError::InvalidDistance(-1.0)
        );
    }

    #[test]
    fn test_unknown_edge_endpoints_are_ignored() {
        let positions = Engine::default().layout(&[0u32, 1], &[(0, 9)]).unwrap();
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_circular_layout() {
        let positions = circular_layout(&[0u32, 1, 2, 3]);
        assert_eq!(positions[&0], Point::new(1.0, 0.0));
        assert!(approx_eq!(f32, positions[&2].x(), -1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, positions[&1].y(), 1.0, epsilon = 1e-6));

        assert_eq!(circular_layout(&[5u32])[&5], Point::default());
        assert!(circular_layout::<u32>(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_node_positioned(
            count in 1usize..10,
            raw_edges in prop::collection::vec((0usize..10, 0usize..10), 0..20),
            seed in any::<u64>(),
        ) {
            let nodes: Vec<usize> = (0..count).collect();
            let edges: Vec<(usize, usize)> = raw_edges
                .into_iter()
                .filter(|(a, b)| *a < count && *b < count)
                .collect();

            let positions = Engine::new(seed).layout(&nodes, &edges).unwrap();
            prop_assert_eq!(positions.len(), count);
            prop_assert!(positions.values().all(|p| p.is_finite()));
            prop_assert!(positions.values().all(|p| p.x().abs() <= 1.0 + 1e-5 && p.y().abs() <= 1.0 + 1e-5));
        }
    }
}
