//! Filtered graphs built for a single sweep threshold.
//!
//! A [`FilteredGraph`] spans the full node set of its parent graph but only a
//! subset of its edges. It answers the two questions the sweep asks of every
//! threshold: how the nodes split into connected components, and the mean
//! weighted shortest-path distance over pairs that can reach each other.

mod union_find;

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::error::define_error_codes;

use self::union_find::DisjointSet;

/// Errors returned while assembling a [`FilteredGraph`].
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum FilteredGraphError {
    /// An edge referenced a node index outside the node set.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node index referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// An edge weight was NaN, infinite or negative.
    #[error("edge ({left}, {right}) has weight {weight}, expected a finite non-negative value")]
    InvalidWeight {
        /// The left endpoint index (as provided).
        left: usize,
        /// The right endpoint index (as provided).
        right: usize,
        /// The rejected weight.
        weight: f64,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`FilteredGraphError`].
    enum FilteredGraphErrorCode for FilteredGraphError {
        /// An edge referenced a node index outside the node set.
        InvalidNodeId => InvalidNodeId { .. } => "FILTERED_INVALID_NODE_ID",
        /// An edge weight was NaN, infinite or negative.
        InvalidWeight => InvalidWeight { .. } => "FILTERED_INVALID_WEIGHT",
    }
}

/// Connected-component decomposition of a [`FilteredGraph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSummary {
    labels: Vec<usize>,
    sizes: Vec<usize>,
}

impl ComponentSummary {
    /// Returns the component label of every node.
    ///
    /// Labels are contiguous from zero and numbered in order of each
    /// component's lowest node index.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[usize] { &self.labels }

    /// Returns the node count of every component, indexed by label.
    #[must_use]
    #[rustfmt::skip]
    pub fn sizes(&self) -> &[usize] { &self.sizes }

    /// Returns the number of components, isolated nodes included.
    #[must_use]
    #[rustfmt::skip]
    pub fn count(&self) -> usize { self.sizes.len() }

    /// Returns the size of the largest (giant) component, or zero for an
    /// empty node set.
    #[must_use]
    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

/// Undirected weighted graph over a fixed node set `0..node_count`.
///
/// # Examples
/// ```
/// use percolate_core::FilteredGraph;
///
/// // 0 - 1 - 2    3
/// let graph = FilteredGraph::from_edges(4, [(0, 1, 10.0), (1, 2, 50.0)])?;
/// let components = graph.components();
/// assert_eq!(components.count(), 2);
/// assert_eq!(components.largest(), 3);
/// assert_eq!(graph.mean_distance(), Some(40.0));
/// # Ok::<(), percolate_core::FilteredGraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FilteredGraph {
    node_count: usize,
    edge_count: usize,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl FilteredGraph {
    /// Builds a graph over `node_count` nodes from `(left, right, weight)`
    /// triples. Nodes touched by no edge stay present as isolated nodes.
    ///
    /// # Errors
    /// Returns [`FilteredGraphError::InvalidNodeId`] when an endpoint is
    /// `>= node_count` and [`FilteredGraphError::InvalidWeight`] when a weight
    /// is not finite or is negative.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, FilteredGraphError> {
        let edges: Vec<(usize, usize, f64)> = edges.into_iter().collect();
        for &(left, right, weight) in &edges {
            for node in [left, right] {
                if node >= node_count {
                    return Err(FilteredGraphError::InvalidNodeId { node, node_count });
                }
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(FilteredGraphError::InvalidWeight {
                    left,
                    right,
                    weight,
                });
            }
        }
        Ok(Self::from_checked_edges(node_count, edges))
    }

    /// Builds the adjacency from edges whose endpoints and weights were
    /// already validated by the caller.
    pub(crate) fn from_checked_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        let mut edge_count = 0_usize;
        for (left, right, weight) in edges {
            edge_count = edge_count.saturating_add(1);
            if left == right {
                continue;
            }
            if let Some(neighbours) = adjacency.get_mut(left) {
                neighbours.push((right, weight));
            }
            if let Some(neighbours) = adjacency.get_mut(right) {
                neighbours.push((left, weight));
            }
        }
        Self {
            node_count,
            edge_count,
            adjacency,
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of edges supplied at construction, self-loops
    /// included.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Decomposes the graph into connected components.
    #[must_use]
    pub fn components(&self) -> ComponentSummary {
        let mut set = DisjointSet::new(self.node_count);
        for (node, neighbours) in self.adjacency.iter().enumerate() {
            for &(other, _) in neighbours {
                if node < other {
                    set.union(node, other);
                }
            }
        }

        let mut root_label = vec![usize::MAX; self.node_count];
        let mut labels = Vec::with_capacity(self.node_count);
        let mut sizes = Vec::with_capacity(set.components());
        for node in 0..self.node_count {
            let root = set.find(node);
            let label = match root_label.get(root).copied() {
                Some(label) if label != usize::MAX => label,
                _ => {
                    let label = sizes.len();
                    if let Some(slot) = root_label.get_mut(root) {
                        *slot = label;
                    }
                    sizes.push(set.size_of_root(root));
                    label
                }
            };
            labels.push(label);
        }

        ComponentSummary { labels, sizes }
    }

    /// Averages the weighted shortest-path distance over every unordered
    /// pair of distinct nodes that can reach each other.
    ///
    /// Pairs in different components are left out of both the sum and the
    /// pair count. Returns `None` when no such pair exists, which is the case
    /// for an edgeless graph or a graph with fewer than two nodes.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "distance accumulation")]
    #[expect(
        clippy::cast_precision_loss,
        reason = "pair counts stay far below 2^52 for graphs that fit in memory"
    )]
    pub fn mean_distance(&self) -> Option<f64> {
        let mut total = 0.0_f64;
        let mut pairs = 0_u64;
        let mut distances = vec![f64::INFINITY; self.node_count];
        let mut touched = Vec::new();

        for source in 0..self.node_count {
            if self.adjacency.get(source).is_none_or(Vec::is_empty) {
                continue;
            }
            self.shortest_paths_from(source, &mut distances, &mut touched);
            for &node in &touched {
                if node > source {
                    if let Some(distance) = distances.get(node) {
                        total += distance;
                        pairs = pairs.saturating_add(1);
                    }
                }
            }
            for &node in &touched {
                if let Some(slot) = distances.get_mut(node) {
                    *slot = f64::INFINITY;
                }
            }
        }

        (pairs > 0).then(|| total / pairs as f64)
    }

    /// Dijkstra from `source`; leaves settled distances in `distances` and
    /// the list of reached nodes in `touched`.
    #[expect(clippy::float_arithmetic, reason = "path length relaxation")]
    fn shortest_paths_from(&self, source: usize, distances: &mut [f64], touched: &mut Vec<usize>) {
        touched.clear();
        let mut heap = BinaryHeap::new();
        if let Some(slot) = distances.get_mut(source) {
            *slot = 0.0;
            touched.push(source);
        }
        heap.push(Frontier {
            distance: 0.0,
            node: source,
        });

        while let Some(Frontier { distance, node }) = heap.pop() {
            if distances.get(node).is_some_and(|&best| distance > best) {
                continue;
            }
            let Some(neighbours) = self.adjacency.get(node) else {
                continue;
            };
            for &(next, weight) in neighbours {
                let candidate = distance + weight;
                let Some(best) = distances.get_mut(next) else {
                    continue;
                };
                if candidate < *best {
                    if best.is_infinite() {
                        touched.push(next);
                    }
                    *best = candidate;
                    heap.push(Frontier {
                        distance: candidate,
                        node: next,
                    });
                }
            }
        }
    }
}

/// Min-heap entry for Dijkstra.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    distance: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` pops the closest node first.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
