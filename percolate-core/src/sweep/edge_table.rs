//! Validated, criterion-sorted snapshot of a graph's edges.

use std::sync::Arc;

use crate::{
    Result,
    error::{GraphSourceError, SweepError},
    filtered::FilteredGraph,
    source::GraphSource,
};

/// An edge as seen by the sweep: endpoints, criterion value and weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct SweepEdge {
    pub(super) criterion: f64,
    pub(super) left: usize,
    pub(super) right: usize,
    pub(super) weight: f64,
}

/// Edges sorted by ascending criterion so that the edges included at a
/// threshold always form a prefix.
#[derive(Debug)]
pub(super) struct EdgeTable {
    node_count: usize,
    edges: Vec<SweepEdge>,
}

impl EdgeTable {
    /// Reads and validates every edge of `graph`.
    ///
    /// Any invalid edge fails the whole load, so a sweep never starts on a
    /// graph it cannot fully evaluate.
    pub(super) fn load<G: GraphSource + ?Sized>(
        graph: &G,
        criterion: &Arc<str>,
        distance: &Arc<str>,
    ) -> Result<Self> {
        let node_count = graph.node_count();
        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in 0..graph.edge_count() {
            let (left, right) = graph
                .endpoints(edge)
                .map_err(|error| source_error(graph, error))?;
            for node in [left, right] {
                if node >= node_count {
                    return Err(SweepError::InvalidEndpoint {
                        graph: Arc::from(graph.name()),
                        edge,
                        node,
                        node_count,
                    });
                }
            }
            let criterion_value = read_numeric(graph, edge, criterion)?;
            let weight = if criterion == distance {
                criterion_value
            } else {
                read_numeric(graph, edge, distance)?
            };
            if weight < 0.0 {
                return Err(SweepError::NegativeDistance {
                    graph: Arc::from(graph.name()),
                    edge,
                    attribute: Arc::clone(distance),
                    value: weight,
                });
            }
            edges.push(SweepEdge {
                criterion: criterion_value,
                left,
                right,
                weight,
            });
        }
        edges.sort_by(|a, b| a.criterion.total_cmp(&b.criterion));
        Ok(Self { node_count, edges })
    }

    #[rustfmt::skip]
    pub(super) fn node_count(&self) -> usize { self.node_count }

    #[rustfmt::skip]
    pub(super) fn len(&self) -> usize { self.edges.len() }

    /// Returns the edges whose criterion is strictly below `threshold`.
    pub(super) fn included(&self, threshold: f64) -> &[SweepEdge] {
        let cut = self.edges.partition_point(|edge| edge.criterion < threshold);
        self.edges.get(..cut).unwrap_or_default()
    }

    /// Builds the filtered graph over the full node set for `threshold`.
    pub(super) fn filter(&self, threshold: f64) -> FilteredGraph {
        FilteredGraph::from_checked_edges(
            self.node_count,
            self.included(threshold)
                .iter()
                .map(|edge| (edge.left, edge.right, edge.weight)),
        )
    }
}

/// Reads a finite numeric edge attribute, mapping lookup failures onto
/// [`SweepError`] variants that name the graph and edge.
pub(crate) fn read_numeric<G: GraphSource + ?Sized>(
    graph: &G,
    edge: usize,
    attribute: &Arc<str>,
) -> Result<f64> {
    let value = match graph.attribute(edge, attribute) {
        Ok(value) => value,
        Err(GraphSourceError::MissingAttribute { .. }) => {
            return Err(SweepError::MissingAttribute {
                graph: Arc::from(graph.name()),
                edge,
                attribute: Arc::clone(attribute),
            });
        }
        Err(error) => return Err(source_error(graph, error)),
    };
    let Some(number) = value.as_number() else {
        return Err(SweepError::NonNumericAttribute {
            graph: Arc::from(graph.name()),
            edge,
            attribute: Arc::clone(attribute),
            found: value.kind(),
        });
    };
    if !number.is_finite() {
        return Err(SweepError::NonFiniteAttribute {
            graph: Arc::from(graph.name()),
            edge,
            attribute: Arc::clone(attribute),
        });
    }
    Ok(number)
}

fn source_error<G: GraphSource + ?Sized>(graph: &G, error: GraphSourceError) -> SweepError {
    SweepError::GraphSource {
        graph: Arc::from(graph.name()),
        error,
    }
}
