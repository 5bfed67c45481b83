//! Error types for the percolate core library.
//!
//! Defines error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced while assembling a [`crate::RoadGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Node identifiers must not be empty.
    #[error("node identifiers must not be empty")]
    EmptyNodeId,
    /// A node identifier was registered twice.
    #[error("node `{id}` is already present in the graph")]
    DuplicateNode {
        /// The repeated identifier.
        id: Arc<str>,
    },
    /// An edge named a node that was never registered.
    #[error("edge references unknown node `{id}`")]
    UnknownNode {
        /// The identifier that could not be resolved.
        id: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Node identifiers must not be empty.
        EmptyNodeId => EmptyNodeId => "GRAPH_EMPTY_NODE_ID",
        /// A node identifier was registered twice.
        DuplicateNode => DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
        /// An edge named a node that was never registered.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
    }
}

/// An error produced by [`crate::GraphSource`] lookups.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphSourceError {
    /// Requested edge index was outside the source's bounds.
    #[error("edge {edge} is out of bounds")]
    EdgeOutOfBounds {
        /// The requested edge index.
        edge: usize,
    },
    /// The edge does not carry the requested attribute.
    #[error("edge {edge} has no attribute `{attribute}`")]
    MissingAttribute {
        /// The edge that lacked the attribute.
        edge: usize,
        /// Name of the missing attribute.
        attribute: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphSourceError`] variants.
    enum GraphSourceErrorCode for GraphSourceError {
        /// Requested edge index was outside the source's bounds.
        EdgeOutOfBounds => EdgeOutOfBounds { .. } => "GRAPH_SOURCE_EDGE_OUT_OF_BOUNDS",
        /// The edge does not carry the requested attribute.
        MissingAttribute => MissingAttribute { .. } => "GRAPH_SOURCE_MISSING_ATTRIBUTE",
    }
}

/// Error type produced when configuring or running [`crate::PercolationSweep`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SweepError {
    /// The sweep was configured without a criterion attribute.
    #[error("criterion attribute name must not be empty")]
    EmptyCriterion,
    /// The distance attribute name was set to an empty string.
    #[error("distance attribute name must not be empty")]
    EmptyDistance,
    /// The worker thread cap must be positive.
    #[error("max_threads must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The rejected thread count.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The graph has no nodes, so no component can be measured.
    #[error("graph `{graph}` contains no nodes")]
    EmptyGraph {
        /// Identifier for the empty graph.
        graph: Arc<str>,
    },
    /// An edge lacks the criterion or distance attribute.
    #[error("graph `{graph}`: edge {edge} has no attribute `{attribute}`")]
    MissingAttribute {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Index of the offending edge.
        edge: usize,
        /// Name of the missing attribute.
        attribute: Arc<str>,
    },
    /// An edge attribute used by the sweep is not numeric.
    #[error("graph `{graph}`: edge {edge} attribute `{attribute}` is {found}, expected a number")]
    NonNumericAttribute {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Index of the offending edge.
        edge: usize,
        /// Name of the attribute.
        attribute: Arc<str>,
        /// Kind of value that was found instead.
        found: &'static str,
    },
    /// An edge attribute used by the sweep is NaN or infinite.
    #[error("graph `{graph}`: edge {edge} attribute `{attribute}` is not finite")]
    NonFiniteAttribute {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Index of the offending edge.
        edge: usize,
        /// Name of the attribute.
        attribute: Arc<str>,
    },
    /// A distance weight is negative, so shortest paths are undefined.
    #[error("graph `{graph}`: edge {edge} distance `{attribute}` is negative ({value})")]
    NegativeDistance {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Index of the offending edge.
        edge: usize,
        /// Name of the distance attribute.
        attribute: Arc<str>,
        /// The negative value.
        value: f64,
    },
    /// An edge endpoint lies outside the graph's node range.
    #[error("graph `{graph}`: edge {edge} references node {node}, but node_count is {node_count}")]
    InvalidEndpoint {
        /// Identifier for the graph.
        graph: Arc<str>,
        /// Index of the offending edge.
        edge: usize,
        /// The out-of-range node index.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A threshold value is NaN or infinite.
    #[error("threshold {value} is not finite")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },
    /// A threshold step must be finite and strictly positive.
    #[error("threshold step must be positive and finite (got {step})")]
    InvalidStep {
        /// The rejected step.
        step: f64,
    },
    /// A generated threshold sequence would be unreasonably long.
    #[error("threshold sequence of {requested} values exceeds the limit of {limit}")]
    TooManyThresholds {
        /// Number of thresholds the request would produce.
        requested: u64,
        /// Maximum number of generated thresholds.
        limit: usize,
    },
    /// The sweep ran past its wall-clock budget and was abandoned.
    #[error("sweep exceeded its time budget of {budget:?} after {completed} of {requested} thresholds")]
    TimeBudgetExceeded {
        /// Thresholds fully evaluated before the budget ran out.
        completed: usize,
        /// Thresholds requested in total.
        requested: usize,
        /// The configured budget.
        budget: Duration,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A [`crate::GraphSource`] lookup failed while reading the graph.
    #[error("graph `{graph}` failed: {error}")]
    GraphSource {
        /// Identifier for the graph that produced the error.
        graph: Arc<str>,
        #[source]
        /// Underlying lookup error.
        error: GraphSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SweepError`] variants.
    enum SweepErrorCode for SweepError {
        /// The sweep was configured without a criterion attribute.
        EmptyCriterion => EmptyCriterion => "SWEEP_EMPTY_CRITERION",
        /// The distance attribute name was set to an empty string.
        EmptyDistance => EmptyDistance => "SWEEP_EMPTY_DISTANCE",
        /// The worker thread cap must be positive.
        InvalidThreadCount => InvalidThreadCount { .. } => "SWEEP_INVALID_THREAD_COUNT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "SWEEP_BACKEND_UNAVAILABLE",
        /// The graph has no nodes.
        EmptyGraph => EmptyGraph { .. } => "SWEEP_EMPTY_GRAPH",
        /// An edge lacks the criterion or distance attribute.
        MissingAttribute => MissingAttribute { .. } => "SWEEP_MISSING_ATTRIBUTE",
        /// An edge attribute used by the sweep is not numeric.
        NonNumericAttribute => NonNumericAttribute { .. } => "SWEEP_NON_NUMERIC_ATTRIBUTE",
        /// An edge attribute used by the sweep is NaN or infinite.
        NonFiniteAttribute => NonFiniteAttribute { .. } => "SWEEP_NON_FINITE_ATTRIBUTE",
        /// A distance weight is negative.
        NegativeDistance => NegativeDistance { .. } => "SWEEP_NEGATIVE_DISTANCE",
        /// An edge endpoint lies outside the graph's node range.
        InvalidEndpoint => InvalidEndpoint { .. } => "SWEEP_INVALID_ENDPOINT",
        /// A threshold value is NaN or infinite.
        InvalidThreshold => InvalidThreshold { .. } => "SWEEP_INVALID_THRESHOLD",
        /// A threshold step must be finite and strictly positive.
        InvalidStep => InvalidStep { .. } => "SWEEP_INVALID_STEP",
        /// A generated threshold sequence would be unreasonably long.
        TooManyThresholds => TooManyThresholds { .. } => "SWEEP_TOO_MANY_THRESHOLDS",
        /// The sweep ran past its wall-clock budget.
        TimeBudgetExceeded => TimeBudgetExceeded { .. } => "SWEEP_TIME_BUDGET_EXCEEDED",
        /// The dedicated worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "SWEEP_THREAD_POOL",
        /// A graph source lookup failed.
        GraphSourceFailure => GraphSource { .. } => "SWEEP_GRAPH_SOURCE_FAILURE",
    }
}

impl SweepError {
    /// Retrieve the inner [`GraphSourceErrorCode`] when the error originated in a
    /// [`crate::GraphSource`].
    #[must_use]
    pub const fn graph_source_code(&self) -> Option<GraphSourceErrorCode> {
        match self {
            Self::GraphSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the sweep API.
pub type Result<T> = core::result::Result<T, SweepError>;
