//! Fixture types for sweep property tests.

use std::sync::Arc;

use test_strategy::Arbitrary;

use crate::{AttributeValue, EdgeAttributes, GraphBuilder, NodeAttributes, RoadGraph};

/// Attribute holding the generated criterion values.
pub(super) const CRITERION: &str = "criterion";
/// Attribute holding the generated distance weights.
pub(super) const WEIGHT: &str = "weight";

/// Shape of the generated road network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Topology {
    /// Roughly `1.5n` random edges.
    #[weight(3)]
    Sparse,
    /// Most node pairs connected.
    #[weight(1)]
    Dense,
    /// Several islands with no edges between them.
    #[weight(2)]
    Islands,
    /// Few distinct criterion values so many edges enter together.
    #[weight(2)]
    TiedCriteria,
    /// Sparse edges plus parallel edges and self-loops.
    #[weight(1)]
    Multigraph,
}

/// One generated edge: endpoints, criterion value and distance weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct FixtureEdge {
    pub left: usize,
    pub right: usize,
    pub criterion: f64,
    pub weight: f64,
}

/// Generated graph plus the thresholds to sweep it with.
#[derive(Clone, Debug)]
pub(super) struct SweepFixture {
    pub node_count: usize,
    pub edges: Vec<FixtureEdge>,
    pub thresholds: Vec<f64>,
    pub topology: Topology,
}

impl SweepFixture {
    /// Materialises the fixture as a [`RoadGraph`].
    pub(super) fn graph(&self) -> RoadGraph {
        let mut builder = GraphBuilder::new(format!("{:?}", self.topology));
        for node in 0..self.node_count {
            builder
                .add_node(node_id(node), NodeAttributes::default())
                .expect("generated ids are unique");
        }
        for edge in &self.edges {
            let attributes = EdgeAttributes::from([
                (Arc::from(CRITERION), AttributeValue::Number(edge.criterion)),
                (Arc::from(WEIGHT), AttributeValue::Number(edge.weight)),
            ]);
            builder
                .add_edge(&node_id(edge.left), &node_id(edge.right), attributes)
                .expect("generated endpoints exist");
        }
        builder.build()
    }

    /// Largest criterion value, or `None` for an edgeless fixture.
    pub(super) fn max_criterion(&self) -> Option<f64> {
        self.edges
            .iter()
            .map(|edge| edge.criterion)
            .reduce(f64::max)
    }

    /// Thresholds sorted ascending.
    pub(super) fn ascending_thresholds(&self) -> Vec<f64> {
        let mut sorted = self.thresholds.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

fn node_id(node: usize) -> String {
    format!("n{node}")
}
