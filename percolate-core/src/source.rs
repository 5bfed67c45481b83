//! Graph source abstraction consumed by the percolation sweep.

use crate::{error::GraphSourceError, graph::AttributeValue};

/// Read-only view of a weighted undirected graph with a fixed node set.
///
/// Nodes are addressed by dense indices `0..node_count()` and edges by
/// `0..edge_count()`. Implementations only need to expose endpoints and named
/// edge attributes; the sweep builds its own filtered graphs from them.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use percolate_core::{AttributeValue, GraphSource, GraphSourceError};
///
/// struct Path(Vec<f64>);
///
/// impl GraphSource for Path {
///     fn name(&self) -> &str { "path" }
///     fn node_count(&self) -> usize { self.0.len() + 1 }
///     fn edge_count(&self) -> usize { self.0.len() }
///     fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphSourceError> {
///         (edge < self.0.len())
///             .then_some((edge, edge + 1))
///             .ok_or(GraphSourceError::EdgeOutOfBounds { edge })
///     }
///     fn attribute(&self, edge: usize, name: &str) -> Result<AttributeValue, GraphSourceError> {
///         match (self.0.get(edge), name) {
///             (Some(value), "time") => Ok(AttributeValue::Number(*value)),
///             (Some(_), _) => Err(GraphSourceError::MissingAttribute {
///                 edge,
///                 attribute: Arc::from(name),
///             }),
///             (None, _) => Err(GraphSourceError::EdgeOutOfBounds { edge }),
///         }
///     }
/// }
///
/// let path = Path(vec![1.0, 2.0]);
/// assert_eq!(path.node_count(), 3);
/// assert_eq!(path.endpoints(1)?, (1, 2));
/// assert_eq!(path.attribute(0, "time")?, AttributeValue::Number(1.0));
/// # Ok::<(), GraphSourceError>(())
/// ```
pub trait GraphSource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of nodes, including isolated ones.
    fn node_count(&self) -> usize;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    /// Returns the two endpoint indices of `edge`.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::EdgeOutOfBounds`] for an invalid index.
    fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphSourceError>;

    /// Returns the value of the attribute `name` on `edge`.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::EdgeOutOfBounds`] for an invalid index and
    /// [`GraphSourceError::MissingAttribute`] when the edge lacks `name`.
    fn attribute(&self, edge: usize, name: &str) -> Result<AttributeValue, GraphSourceError>;
}
