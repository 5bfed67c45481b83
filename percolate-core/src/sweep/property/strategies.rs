//! Strategy builders for sweep property tests.
//!
//! Graphs are drawn from a seeded [`SmallRng`] so that a failing case can be
//! replayed from its topology and seed alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{FixtureEdge, SweepFixture, Topology};

const MIN_NODES: usize = 1;
const MAX_NODES: usize = 24;
/// Thresholds are drawn in half steps from `0.0` to `55.0`.
const THRESHOLD_HALF_STEPS: u32 = 110;

/// Generates fixtures across every [`Topology`].
pub(super) fn sweep_fixture_strategy() -> impl Strategy<Value = SweepFixture> {
    (any::<Topology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

/// Generates a fixture for a specific topology.
pub(super) fn generate_fixture(topology: Topology, rng: &mut SmallRng) -> SweepFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edges = match topology {
        Topology::Sparse => random_edges(rng, node_count, node_count * 3 / 2, half_steps),
        Topology::Dense => dense_edges(rng, node_count),
        Topology::Islands => island_edges(rng, node_count),
        Topology::TiedCriteria => random_edges(rng, node_count, node_count * 2, few_levels),
        Topology::Multigraph => multigraph_edges(rng, node_count),
    };
    let thresholds = thresholds(rng, &edges);
    SweepFixture {
        node_count,
        edges,
        thresholds,
        topology,
    }
}

fn half_steps(rng: &mut SmallRng) -> f64 {
    f64::from(rng.gen_range(0_u32..=100)) / 2.0
}

fn few_levels(rng: &mut SmallRng) -> f64 {
    f64::from(rng.gen_range(0_u32..4)) * 10.0
}

fn weight(rng: &mut SmallRng) -> f64 {
    rng.gen_range(0.5..20.0)
}

fn edge(rng: &mut SmallRng, left: usize, right: usize, criterion: f64) -> FixtureEdge {
    FixtureEdge {
        left,
        right,
        criterion,
        weight: weight(rng),
    }
}

fn random_edges(
    rng: &mut SmallRng,
    node_count: usize,
    count: usize,
    mut criterion: impl FnMut(&mut SmallRng) -> f64,
) -> Vec<FixtureEdge> {
    if node_count < 2 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let left = rng.gen_range(0..node_count);
            let mut right = rng.gen_range(0..node_count - 1);
            if right >= left {
                right += 1;
            }
            let value = criterion(rng);
            edge(rng, left, right, value)
        })
        .collect()
}

fn dense_edges(rng: &mut SmallRng, node_count: usize) -> Vec<FixtureEdge> {
    let probability = rng.gen_range(0.6..0.95);
    let mut edges = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(probability) {
                let value = half_steps(rng);
                edges.push(edge(rng, left, right, value));
            }
        }
    }
    edges
}

fn island_edges(rng: &mut SmallRng, node_count: usize) -> Vec<FixtureEdge> {
    let islands = rng.gen_range(2..=4).min(node_count.max(1));
    let mut edges = Vec::new();
    // Node `n` lives on island `n % islands`; chain each island's members.
    for island in 0..islands {
        let members: Vec<usize> = (island..node_count).step_by(islands).collect();
        for pair in members.windows(2) {
            if let [left, right] = *pair {
                let value = half_steps(rng);
                edges.push(edge(rng, left, right, value));
            }
        }
    }
    edges
}

fn multigraph_edges(rng: &mut SmallRng, node_count: usize) -> Vec<FixtureEdge> {
    let mut edges = random_edges(rng, node_count, node_count, half_steps);
    let duplicates: Vec<FixtureEdge> = edges
        .iter()
        .filter(|_| rng.gen_bool(0.4))
        .copied()
        .collect();
    for original in duplicates {
        let value = half_steps(rng);
        edges.push(edge(rng, original.right, original.left, value));
    }
    for _ in 0..rng.gen_range(1..=3) {
        let node = rng.gen_range(0..node_count);
        let value = half_steps(rng);
        edges.push(edge(rng, node, node, value));
    }
    edges
}

/// Unsorted thresholds with a duplicate, zero, and a value past every
/// criterion.
fn thresholds(rng: &mut SmallRng, edges: &[FixtureEdge]) -> Vec<f64> {
    let ceiling = edges
        .iter()
        .map(|edge| edge.criterion)
        .fold(0.0, f64::max);
    let mut values: Vec<f64> = (0..rng.gen_range(3..10))
        .map(|_| f64::from(rng.gen_range(0..=THRESHOLD_HALF_STEPS)) / 2.0)
        .collect();
    values.push(0.0);
    values.push(ceiling + 1.0);
    if let Some(&first) = values.first() {
        values.push(first);
    }
    values
}
