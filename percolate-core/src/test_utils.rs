//! Shared test utilities for `percolate-core`.

use std::sync::Arc;

use percolate_test_support::proptest_profile::case_count;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    AttributeValue, EdgeAttributes, GraphBuilder, GraphSource, GraphSourceError, NodeAttributes,
    RoadGraph,
};

/// Builds a proptest configuration honouring the shared case override.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: case_count(default_cases),
        ..ProptestConfig::default()
    }
}

/// Edge attributes carrying a single `time` value.
pub(crate) fn time(value: f64) -> EdgeAttributes {
    EdgeAttributes::from([(Arc::from("time"), AttributeValue::Number(value))])
}

/// The four-node chain `A -10- B -50- C -90- D` keyed on `time`.
pub(crate) fn reference_chain() -> RoadGraph {
    let mut builder = GraphBuilder::new("chain");
    for id in ["A", "B", "C", "D"] {
        builder
            .add_node(id, NodeAttributes::default())
            .expect("ids are unique");
    }
    for (from, to, value) in [("A", "B", 10.0), ("B", "C", 50.0), ("C", "D", 90.0)] {
        builder
            .add_edge(from, to, time(value))
            .expect("endpoints exist");
    }
    builder.build()
}

/// [`GraphSource`] over raw endpoint indices, able to express edges a
/// [`GraphBuilder`] would refuse.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeListSource {
    pub(crate) node_count: usize,
    pub(crate) edges: Vec<(usize, usize, EdgeAttributes)>,
}

impl EdgeListSource {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    pub(crate) fn with_edge(mut self, left: usize, right: usize, attributes: EdgeAttributes) -> Self {
        self.edges.push((left, right, attributes));
        self
    }
}

impl GraphSource for EdgeListSource {
    fn name(&self) -> &str {
        "edge-list"
    }

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphSourceError> {
        self.edges
            .get(edge)
            .map(|(left, right, _)| (*left, *right))
            .ok_or(GraphSourceError::EdgeOutOfBounds { edge })
    }

    fn attribute(&self, edge: usize, name: &str) -> Result<AttributeValue, GraphSourceError> {
        let (_, _, attributes) = self
            .edges
            .get(edge)
            .ok_or(GraphSourceError::EdgeOutOfBounds { edge })?;
        attributes
            .get(name)
            .cloned()
            .ok_or_else(|| GraphSourceError::MissingAttribute {
                edge,
                attribute: Arc::from(name),
            })
    }
}

/// Source whose edge count overstates its edges, so lookups fail mid-load.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TruncatedSource;

impl GraphSource for TruncatedSource {
    fn name(&self) -> &str {
        "truncated"
    }

    fn node_count(&self) -> usize {
        2
    }

    fn edge_count(&self) -> usize {
        1
    }

    fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphSourceError> {
        Err(GraphSourceError::EdgeOutOfBounds { edge })
    }

    fn attribute(&self, edge: usize, _name: &str) -> Result<AttributeValue, GraphSourceError> {
        Err(GraphSourceError::EdgeOutOfBounds { edge })
    }
}
