//! Percolate core library.
//!
//! Sweeps a weighted road network over a sequence of thresholds, keeping at
//! each step only the edges whose criterion attribute lies strictly below
//! the threshold, and records how the network fragments: the size of the
//! giant component, the number of components and the mean shortest-path
//! distance between nodes that can still reach each other.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod filtered;
mod graph;
mod result;
mod source;
mod sweep;
#[cfg(test)]
mod test_utils;
mod thresholds;

pub use crate::{
    builder::{ExecutionStrategy, SweepBuilder},
    error::{
        GraphError, GraphErrorCode, GraphSourceError, GraphSourceErrorCode, Result, SweepError,
        SweepErrorCode,
    },
    filtered::{ComponentSummary, FilteredGraph, FilteredGraphError, FilteredGraphErrorCode},
    graph::{
        AttributeValue, Edge, EdgeAttributes, GraphBuilder, Node, NodeAttributes, NodeKind,
        ParseNodeKindError, RoadGraph,
    },
    result::{PercolationResult, SweepReport},
    source::GraphSource,
    sweep::PercolationSweep,
    thresholds::{MAX_GENERATED_THRESHOLDS, Thresholds},
};
