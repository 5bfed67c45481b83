//! In-memory road graph model.
//!
//! [`RoadGraph`] stores a fixed node set and an undirected multigraph of
//! edges annotated with named attribute values. Graphs are assembled with
//! [`GraphBuilder`] and consumed by the sweep through [`crate::GraphSource`].

mod attributes;

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use crate::{
    error::{GraphError, GraphSourceError},
    source::GraphSource,
};

pub use self::attributes::{AttributeValue, NodeAttributes, NodeKind, ParseNodeKindError};

/// Named attribute values attached to an edge.
pub type EdgeAttributes = BTreeMap<Arc<str>, AttributeValue>;

/// A graph node: a unique identifier plus optional descriptive attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: Arc<str>,
    attributes: NodeAttributes,
}

impl Node {
    /// Returns the node identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Returns the descriptive attributes of the node.
    #[must_use]
    #[rustfmt::skip]
    pub fn attributes(&self) -> &NodeAttributes { &self.attributes }
}

/// An undirected edge between two node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    attributes: EdgeAttributes,
}

impl Edge {
    /// Returns the index of the first endpoint, as inserted.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the index of the second endpoint, as inserted.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns every attribute attached to the edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn attributes(&self) -> &EdgeAttributes { &self.attributes }

    /// Looks up a single attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// An undirected, multigraph-capable road network.
///
/// # Examples
/// ```
/// use percolate_core::{
///     AttributeValue, EdgeAttributes, GraphBuilder, GraphSource, NodeAttributes,
/// };
///
/// let mut builder = GraphBuilder::new("demo");
/// builder.add_node("a", NodeAttributes::default())?;
/// builder.add_node("b", NodeAttributes::default())?;
/// let attributes = EdgeAttributes::from([("time".into(), AttributeValue::Number(3.0))]);
/// builder.add_edge("a", "b", attributes)?;
/// let graph = builder.build();
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.attribute_max("time"), Some(3.0));
/// # Ok::<(), percolate_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RoadGraph {
    name: Arc<str>,
    nodes: Vec<Node>,
    index: HashMap<Arc<str>, usize>,
    edges: Vec<Edge>,
}

impl RoadGraph {
    /// Returns the graph's human-readable name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the nodes in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the position of the node with identifier `id`.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the largest numeric value of the edge attribute `name`.
    ///
    /// Edges lacking the attribute, or carrying a non-numeric or NaN value,
    /// are skipped. Returns `None` when no edge carries a usable value.
    #[must_use]
    pub fn attribute_max(&self, name: &str) -> Option<f64> {
        self.edges
            .iter()
            .filter_map(|edge| edge.attribute(name).and_then(AttributeValue::as_number))
            .filter(|value| !value.is_nan())
            .max_by(f64::total_cmp)
    }

    /// Lists the attribute names that hold a number on at least one edge.
    #[must_use]
    pub fn numeric_attribute_names(&self) -> BTreeSet<Arc<str>> {
        self.edges
            .iter()
            .flat_map(|edge| edge.attributes.iter())
            .filter(|(_, value)| value.as_number().is_some())
            .map(|(name, _)| Arc::clone(name))
            .collect()
    }

    /// Builds the subgraph induced by the nodes that satisfy `keep`.
    ///
    /// Retained nodes keep their relative order. An edge survives when both
    /// of its endpoints survive.
    ///
    /// # Examples
    /// ```
    /// use percolate_core::{EdgeAttributes, GraphBuilder, GraphSource, NodeAttributes};
    ///
    /// let mut builder = GraphBuilder::new("continent");
    /// builder.add_node("a", NodeAttributes::default().with_region("South"))?;
    /// builder.add_node("b", NodeAttributes::default().with_region("South"))?;
    /// builder.add_node("c", NodeAttributes::default().with_region("North"))?;
    /// builder.add_edge("a", "b", EdgeAttributes::new())?;
    /// builder.add_edge("b", "c", EdgeAttributes::new())?;
    /// let graph = builder.build();
    ///
    /// let south = graph.induced_subgraph("south", |node| {
    ///     node.attributes().region() == Some("South")
    /// });
    /// assert_eq!(south.node_count(), 2);
    /// assert_eq!(south.edge_count(), 1);
    /// # Ok::<(), percolate_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn induced_subgraph(
        &self,
        name: impl Into<Arc<str>>,
        mut keep: impl FnMut(&Node) -> bool,
    ) -> Self {
        let mut remap = vec![None; self.nodes.len()];
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for (old, node) in self.nodes.iter().enumerate() {
            if !keep(node) {
                continue;
            }
            let new = nodes.len();
            if let Some(slot) = remap.get_mut(old) {
                *slot = Some(new);
            }
            index.insert(Arc::clone(&node.id), new);
            nodes.push(node.clone());
        }

        let lookup = |old: usize| remap.get(old).copied().flatten();
        let edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                let source = lookup(edge.source)?;
                let target = lookup(edge.target)?;
                Some(Edge {
                    source,
                    target,
                    attributes: edge.attributes.clone(),
                })
            })
            .collect();

        Self {
            name: name.into(),
            nodes,
            index,
            edges,
        }
    }
}

impl GraphSource for RoadGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphSourceError> {
        self.edges
            .get(edge)
            .map(|found| (found.source, found.target))
            .ok_or(GraphSourceError::EdgeOutOfBounds { edge })
    }

    fn attribute(&self, edge: usize, name: &str) -> Result<AttributeValue, GraphSourceError> {
        let found = self
            .edges
            .get(edge)
            .ok_or(GraphSourceError::EdgeOutOfBounds { edge })?;
        found
            .attribute(name)
            .cloned()
            .ok_or_else(|| GraphSourceError::MissingAttribute {
                edge,
                attribute: Arc::from(name),
            })
    }
}

/// Incrementally assembles a [`RoadGraph`].
///
/// Nodes must be registered before the edges that reference them.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    name: Arc<str>,
    nodes: Vec<Node>,
    index: HashMap<Arc<str>, usize>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Creates an empty builder for a graph called `name`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the number of nodes registered so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Registers a node and returns its index.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyNodeId`] for an empty identifier and
    /// [`GraphError::DuplicateNode`] when `id` is already registered.
    pub fn add_node(
        &mut self,
        id: impl Into<Arc<str>>,
        attributes: NodeAttributes,
    ) -> Result<usize, GraphError> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyNodeId);
        }
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        let position = self.nodes.len();
        self.index.insert(Arc::clone(&id), position);
        self.nodes.push(Node { id, attributes });
        Ok(position)
    }

    /// Adds an undirected edge between two registered nodes and returns its
    /// index. Parallel edges and self-loops are accepted.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when either endpoint is not
    /// registered.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        attributes: EdgeAttributes,
    ) -> Result<usize, GraphError> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        let position = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            attributes,
        });
        Ok(position)
    }

    /// Finalises the graph.
    #[must_use]
    pub fn build(self) -> RoadGraph {
        RoadGraph {
            name: self.name,
            nodes: self.nodes,
            index: self.index,
            edges: self.edges,
        }
    }

    fn resolve(&self, id: &str) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode { id: Arc::from(id) })
    }
}
