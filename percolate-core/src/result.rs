//! Result types for percolation sweeps.
//!
//! A sweep yields one [`PercolationResult`] per threshold, gathered into an
//! immutable [`SweepReport`] that also exposes the three plot series.

use std::sync::Arc;

/// Resilience metrics of the graph filtered at a single threshold.
///
/// # Examples
/// ```
/// use percolate_core::PercolationResult;
///
/// let result = PercolationResult::new(20.0, 2, 3, Some(10.0), 1);
/// assert_eq!(result.giant_component_size(), 2);
/// assert_eq!(result.component_count(), 3);
/// assert_eq!(result.mean_distance(), Some(10.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercolationResult {
    threshold: f64,
    giant_component_size: usize,
    component_count: usize,
    mean_distance: Option<f64>,
    included_edges: usize,
}

impl PercolationResult {
    /// Assembles a result from its parts.
    #[must_use]
    pub const fn new(
        threshold: f64,
        giant_component_size: usize,
        component_count: usize,
        mean_distance: Option<f64>,
        included_edges: usize,
    ) -> Self {
        Self {
            threshold,
            giant_component_size,
            component_count,
            mean_distance,
            included_edges,
        }
    }

    /// Returns the threshold this result was measured at.
    #[must_use]
    #[rustfmt::skip]
    pub const fn threshold(&self) -> f64 { self.threshold }

    /// Returns the node count of the largest connected component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn giant_component_size(&self) -> usize { self.giant_component_size }

    /// Returns the number of connected components, isolated nodes included.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns the mean distance over connected pairs.
    ///
    /// `None` means no pair of nodes was connected at this threshold; it is
    /// not the same as a measured distance of zero.
    #[must_use]
    #[rustfmt::skip]
    pub const fn mean_distance(&self) -> Option<f64> { self.mean_distance }

    /// Returns how many edges passed the criterion at this threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn included_edges(&self) -> usize { self.included_edges }
}

/// Ordered outcome of a [`crate::PercolationSweep::run`] invocation.
///
/// Results appear in the order the thresholds were supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepReport {
    graph: Arc<str>,
    criterion: Arc<str>,
    distance: Arc<str>,
    node_count: usize,
    edge_count: usize,
    results: Vec<PercolationResult>,
}

impl SweepReport {
    pub(crate) fn new(
        graph: Arc<str>,
        criterion: Arc<str>,
        distance: Arc<str>,
        node_count: usize,
        edge_count: usize,
        results: Vec<PercolationResult>,
    ) -> Self {
        Self {
            graph,
            criterion,
            distance,
            node_count,
            edge_count,
            results,
        }
    }

    /// Returns the name of the swept graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &str { &self.graph }

    /// Returns the criterion attribute name.
    #[must_use]
    #[rustfmt::skip]
    pub fn criterion(&self) -> &str { &self.criterion }

    /// Returns the distance attribute name.
    #[must_use]
    #[rustfmt::skip]
    pub fn distance(&self) -> &str { &self.distance }

    /// Returns the node count of the swept graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the edge count of the swept graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the per-threshold results in sweep order.
    #[must_use]
    #[rustfmt::skip]
    pub fn results(&self) -> &[PercolationResult] { &self.results }

    /// Returns `true` when the sweep covered no thresholds.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.results.is_empty() }

    /// Returns `(threshold, giant component size)` pairs.
    #[must_use]
    pub fn giant_component_series(&self) -> Vec<(f64, usize)> {
        self.results
            .iter()
            .map(|result| (result.threshold, result.giant_component_size))
            .collect()
    }

    /// Returns `(threshold, component count)` pairs.
    #[must_use]
    pub fn component_count_series(&self) -> Vec<(f64, usize)> {
        self.results
            .iter()
            .map(|result| (result.threshold, result.component_count))
            .collect()
    }

    /// Returns `(threshold, mean distance)` pairs, omitting thresholds where
    /// the mean distance is undefined.
    #[must_use]
    pub fn mean_distance_series(&self) -> Vec<(f64, f64)> {
        self.results
            .iter()
            .filter_map(|result| {
                result
                    .mean_distance
                    .map(|distance| (result.threshold, distance))
            })
            .collect()
    }

    /// Consumes the report and returns the per-threshold results.
    #[must_use]
    pub fn into_results(self) -> Vec<PercolationResult> {
        self.results
    }
}
