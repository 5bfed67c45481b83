//! Builder utilities for configuring percolation sweeps.
//!
//! Exposes the execution strategy selection surface and the builder
//! validation performed before constructing [`PercolationSweep`] instances.

use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use crate::{Result, error::SweepError, sweep::PercolationSweep};

/// Indicates how [`PercolationSweep`] schedules threshold evaluations when
/// [`PercolationSweep::run`] is invoked.
///
/// `Auto` resolves deterministically: it selects `Parallel` when the
/// `parallel` feature is compiled in and `Sequential` otherwise, so the
/// output is identical across builds.
///
/// # Examples
/// ```
/// use percolate_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select the scheduling automatically.
    Auto,
    /// Evaluate thresholds one after another on the calling thread.
    Sequential,
    /// Evaluate thresholds concurrently on a rayon worker pool.
    Parallel,
}

/// Configures and constructs [`PercolationSweep`] instances.
///
/// # Examples
/// ```
/// use percolate_core::{ExecutionStrategy, SweepBuilder};
///
/// let sweep = SweepBuilder::new()
///     .with_criterion("time_border")
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(sweep.criterion(), "time_border");
/// assert_eq!(sweep.distance(), "time_border");
/// assert_eq!(sweep.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct SweepBuilder {
    criterion: Option<Arc<str>>,
    distance: Option<Arc<str>>,
    execution_strategy: ExecutionStrategy,
    max_threads: Option<usize>,
    time_budget: Option<Duration>,
}

impl Default for SweepBuilder {
    fn default() -> Self {
        Self {
            criterion: None,
            distance: None,
            execution_strategy: ExecutionStrategy::Auto,
            max_threads: None,
            time_budget: None,
        }
    }
}

impl SweepBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edge attribute compared against each threshold.
    #[must_use]
    pub fn with_criterion(mut self, name: impl Into<Arc<str>>) -> Self {
        self.criterion = Some(name.into());
        self
    }

    /// Sets the edge attribute used as the distance weight. Defaults to the
    /// criterion attribute.
    ///
    /// # Examples
    /// ```
    /// use percolate_core::SweepBuilder;
    ///
    /// let sweep = SweepBuilder::new()
    ///     .with_criterion("time_border")
    ///     .with_distance("length")
    ///     .build()
    ///     .expect("configuration is valid");
    /// assert_eq!(sweep.distance(), "length");
    /// ```
    #[must_use]
    pub fn with_distance(mut self, name: impl Into<Arc<str>>) -> Self {
        self.distance = Some(name.into());
        self
    }

    /// Sets the execution strategy to use when running the sweep.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Caps the number of worker threads used by the parallel strategy.
    ///
    /// Without a cap the global rayon pool is used.
    #[must_use]
    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = Some(threads);
        self
    }

    /// Bounds the wall-clock time of a sweep. Once the budget is spent no
    /// further threshold evaluation starts and the sweep fails.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Returns the configured criterion attribute, if any.
    #[must_use]
    pub fn criterion(&self) -> Option<&str> {
        self.criterion.as_deref()
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`PercolationSweep`].
    ///
    /// # Errors
    /// Returns [`SweepError::EmptyCriterion`] when no criterion (or an empty
    /// one) was supplied, [`SweepError::EmptyDistance`] for an empty distance
    /// name, and [`SweepError::InvalidThreadCount`] for a zero thread cap.
    ///
    /// # Examples
    /// ```
    /// use percolate_core::{SweepBuilder, SweepError};
    ///
    /// let err = SweepBuilder::new().build().expect_err("criterion is required");
    /// assert!(matches!(err, SweepError::EmptyCriterion));
    /// ```
    pub fn build(self) -> Result<PercolationSweep> {
        let criterion = self
            .criterion
            .filter(|name| !name.is_empty())
            .ok_or(SweepError::EmptyCriterion)?;
        let distance = match self.distance {
            Some(name) if name.is_empty() => return Err(SweepError::EmptyDistance),
            Some(name) => name,
            None => Arc::clone(&criterion),
        };
        let max_threads = self
            .max_threads
            .map(|threads| {
                NonZeroUsize::new(threads).ok_or(SweepError::InvalidThreadCount { got: threads })
            })
            .transpose()?;

        Ok(PercolationSweep::new(
            criterion,
            distance,
            self.execution_strategy,
            max_threads,
            self.time_budget,
        ))
    }
}
