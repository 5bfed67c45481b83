//! Percolation sweep orchestration.
//!
//! Provides the [`PercolationSweep`] runtime entry point. A sweep validates
//! the graph once, then evaluates every threshold independently against the
//! same immutable edge table, either on the calling thread or across a rayon
//! pool.

mod budget;
mod edge_table;

use std::{
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{Span, debug_span, info, instrument, warn};

use crate::{
    Result,
    builder::ExecutionStrategy,
    error::SweepError,
    result::{PercolationResult, SweepReport},
    source::GraphSource,
};

use self::{budget::Budget, edge_table::EdgeTable};

pub(crate) use self::edge_table::read_numeric;

/// Entry point for running percolation sweeps.
///
/// # Examples
/// ```
/// use percolate_core::{
///     AttributeValue, EdgeAttributes, ExecutionStrategy, GraphBuilder, NodeAttributes,
///     SweepBuilder,
/// };
///
/// let mut builder = GraphBuilder::new("pair");
/// builder.add_node("a", NodeAttributes::default())?;
/// builder.add_node("b", NodeAttributes::default())?;
/// let mut attributes = EdgeAttributes::new();
/// attributes.insert("time".into(), AttributeValue::Number(5.0));
/// builder.add_edge("a", "b", attributes)?;
/// let graph = builder.build();
///
/// let sweep = SweepBuilder::new()
///     .with_criterion("time")
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?;
/// let report = sweep.run(&graph, &[5.0, 6.0])?;
/// assert_eq!(report.component_count_series(), vec![(5.0, 2), (6.0, 1)]);
/// assert_eq!(report.mean_distance_series(), vec![(6.0, 5.0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PercolationSweep {
    criterion: Arc<str>,
    distance: Arc<str>,
    execution_strategy: ExecutionStrategy,
    max_threads: Option<NonZeroUsize>,
    time_budget: Option<Duration>,
}

impl PercolationSweep {
    pub(crate) fn new(
        criterion: Arc<str>,
        distance: Arc<str>,
        execution_strategy: ExecutionStrategy,
        max_threads: Option<NonZeroUsize>,
        time_budget: Option<Duration>,
    ) -> Self {
        Self {
            criterion,
            distance,
            execution_strategy,
            max_threads,
            time_budget,
        }
    }

    /// Returns the edge attribute compared against each threshold.
    #[must_use]
    #[rustfmt::skip]
    pub fn criterion(&self) -> &str { &self.criterion }

    /// Returns the edge attribute used as the shortest-path weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn distance(&self) -> &str { &self.distance }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the worker thread cap, if one was configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_threads(&self) -> Option<NonZeroUsize> { self.max_threads }

    /// Returns the wall-clock budget, if one was configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn time_budget(&self) -> Option<Duration> { self.time_budget }

    /// Sweeps `graph` over `thresholds`, returning one result per threshold
    /// in the order the thresholds were given.
    ///
    /// At each threshold the edges whose criterion is strictly below it are
    /// kept, the full node set is preserved, and the giant component size,
    /// the component count and the mean distance over connected pairs are
    /// recorded. Duplicate thresholds are evaluated independently. An empty
    /// threshold slice yields an empty report.
    ///
    /// # Errors
    /// Validation happens before any threshold is evaluated, so a failing
    /// sweep never produces partial results:
    ///
    /// - [`SweepError::EmptyGraph`] when the graph has no nodes;
    /// - [`SweepError::InvalidThreshold`] for a NaN or infinite threshold;
    /// - [`SweepError::MissingAttribute`], [`SweepError::NonNumericAttribute`]
    ///   and [`SweepError::NonFiniteAttribute`] when an edge's criterion or
    ///   distance attribute cannot be read as a finite number;
    /// - [`SweepError::NegativeDistance`] for a negative distance weight;
    /// - [`SweepError::InvalidEndpoint`] and [`SweepError::GraphSource`] when
    ///   the source reports inconsistent edges;
    /// - [`SweepError::BackendUnavailable`] when [`ExecutionStrategy::Parallel`]
    ///   was requested without the `parallel` feature;
    /// - [`SweepError::ThreadPool`] when a capped worker pool cannot start.
    ///
    /// [`SweepError::TimeBudgetExceeded`] is returned when the configured
    /// budget runs out; the whole sweep is discarded.
    #[instrument(
        name = "core.sweep",
        err,
        skip(self, graph, thresholds),
        fields(
            graph = %graph.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            thresholds = thresholds.len(),
            criterion = %self.criterion,
            distance = %self.distance,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run<G: GraphSource + ?Sized>(
        &self,
        graph: &G,
        thresholds: &[f64],
    ) -> Result<SweepReport> {
        if graph.node_count() == 0 {
            warn!(graph = graph.name(), "graph has no nodes, returning error");
            return Err(SweepError::EmptyGraph {
                graph: Arc::from(graph.name()),
            });
        }
        if let Some(&value) = thresholds.iter().find(|value| !value.is_finite()) {
            return Err(SweepError::InvalidThreshold { value });
        }
        let table = EdgeTable::load(graph, &self.criterion, &self.distance).inspect_err(
            |error| warn!(graph = graph.name(), code = %error.code(), "edge validation failed"),
        )?;

        let budget = Budget::new(self.time_budget, thresholds.len());
        let results = self.dispatch(&table, thresholds, &budget)?;
        info!(
            thresholds = results.len(),
            edges = table.len(),
            "sweep completed"
        );

        Ok(SweepReport::new(
            Arc::from(graph.name()),
            Arc::clone(&self.criterion),
            Arc::clone(&self.distance),
            table.node_count(),
            table.len(),
            results,
        ))
    }

    fn dispatch(
        &self,
        table: &EdgeTable,
        thresholds: &[f64],
        budget: &Budget,
    ) -> Result<Vec<PercolationResult>> {
        match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => {
                self.run_parallel(table, thresholds, budget)
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => run_sequential(table, thresholds, budget),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(SweepError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            ExecutionStrategy::Sequential => run_sequential(table, thresholds, budget),
        }
    }

    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    fn run_parallel(
        &self,
        table: &EdgeTable,
        thresholds: &[f64],
        budget: &Budget,
    ) -> Result<Vec<PercolationResult>> {
        use rayon::prelude::*;

        let parent = Span::current();
        let sweep = || {
            thresholds
                .par_iter()
                .map(|&threshold| evaluate_within(table, threshold, budget, &parent))
                .collect::<Result<Vec<_>>>()
        };

        match self.max_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads.get())
                .build()
                .map_err(|error| SweepError::ThreadPool {
                    message: Arc::from(error.to_string()),
                })?
                .install(sweep),
            None => sweep(),
        }
    }
}

fn run_sequential(
    table: &EdgeTable,
    thresholds: &[f64],
    budget: &Budget,
) -> Result<Vec<PercolationResult>> {
    let parent = Span::current();
    thresholds
        .iter()
        .map(|&threshold| evaluate_within(table, threshold, budget, &parent))
        .collect()
}

/// Evaluates one threshold unless the budget is already spent.
fn evaluate_within(
    table: &EdgeTable,
    threshold: f64,
    budget: &Budget,
    parent: &Span,
) -> Result<PercolationResult> {
    budget.admit()?;
    let _span = debug_span!(parent: parent, "core.sweep.threshold", threshold).entered();
    let result = evaluate(table, threshold);
    budget.complete();
    Ok(result)
}

fn evaluate(table: &EdgeTable, threshold: f64) -> PercolationResult {
    let started = Instant::now();
    let filtered = table.filter(threshold);
    let components = filtered.components();
    let result = PercolationResult::new(
        threshold,
        components.largest(),
        components.count(),
        filtered.mean_distance(),
        filtered.edge_count(),
    );
    record_threshold(started.elapsed());
    result
}

#[cfg(feature = "metrics")]
fn record_threshold(elapsed: Duration) {
    metrics::counter!("percolation_thresholds_evaluated").increment(1);
    metrics::histogram!("percolation_threshold_latency_seconds").record(elapsed.as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
fn record_threshold(_elapsed: Duration) {}

#[cfg(test)]
mod property;
