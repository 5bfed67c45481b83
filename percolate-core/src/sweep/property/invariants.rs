//! Property runners for the percolation sweep.

use std::sync::Arc;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    ExecutionStrategy, PercolationResult, SweepBuilder, SweepReport,
    sweep::edge_table::EdgeTable,
};

use super::oracle::oracle_step;
use super::types::{CRITERION, SweepFixture, WEIGHT};

const TOLERANCE: f64 = 1e-9;

fn run(
    fixture: &SweepFixture,
    strategy: ExecutionStrategy,
    thresholds: &[f64],
) -> Result<SweepReport, TestCaseError> {
    let sweep = SweepBuilder::new()
        .with_criterion(CRITERION)
        .with_distance(WEIGHT)
        .with_execution_strategy(strategy)
        .build()
        .map_err(|error| TestCaseError::fail(format!("builder failed: {error}")))?;
    sweep
        .run(&fixture.graph(), thresholds)
        .map_err(|error| {
            TestCaseError::fail(format!(
                "sweep failed: {error} (topology={:?}, nodes={}, edges={})",
                fixture.topology,
                fixture.node_count,
                fixture.edges.len(),
            ))
        })
}

/// Every result must agree with the dense oracle.
pub(super) fn run_oracle_equivalence_property(fixture: &SweepFixture) -> TestCaseResult {
    let report = run(fixture, ExecutionStrategy::Sequential, &fixture.thresholds)?;
    if report.results().len() != fixture.thresholds.len() {
        return Err(TestCaseError::fail("one result per threshold"));
    }
    for (result, &threshold) in report.results().iter().zip(&fixture.thresholds) {
        let expected = oracle_step(fixture, threshold);
        let context = format!("threshold {threshold} ({:?})", fixture.topology);
        if result.threshold().to_bits() != threshold.to_bits() {
            return Err(TestCaseError::fail(format!("{context}: order not preserved")));
        }
        if result.giant_component_size() != expected.giant_component_size
            || result.component_count() != expected.component_count
            || result.included_edges() != expected.included_edges
        {
            return Err(TestCaseError::fail(format!(
                "{context}: got {result:?}, oracle {expected:?}"
            )));
        }
        match (result.mean_distance(), expected.mean_distance) {
            (None, None) => {}
            (Some(actual), Some(wanted))
                if (actual - wanted).abs() <= TOLERANCE * wanted.max(1.0) => {}
            (actual, wanted) => {
                return Err(TestCaseError::fail(format!(
                    "{context}: mean distance {actual:?}, oracle {wanted:?}"
                )));
            }
        }
    }
    Ok(())
}

/// Over ascending thresholds edges only accumulate, components only merge
/// and the giant component only grows.
pub(super) fn run_monotonicity_property(fixture: &SweepFixture) -> TestCaseResult {
    let ascending = fixture.ascending_thresholds();
    let report = run(fixture, ExecutionStrategy::Sequential, &ascending)?;
    for pair in report.results().windows(2) {
        let [before, after] = pair else {
            continue;
        };
        check_monotone_step(before, after)?;
    }
    Ok(())
}

fn check_monotone_step(before: &PercolationResult, after: &PercolationResult) -> TestCaseResult {
    let context = format!("{} -> {}", before.threshold(), after.threshold());
    if after.included_edges() < before.included_edges() {
        return Err(TestCaseError::fail(format!("{context}: edges were dropped")));
    }
    if after.component_count() > before.component_count() {
        return Err(TestCaseError::fail(format!("{context}: component count rose")));
    }
    if after.giant_component_size() < before.giant_component_size() {
        return Err(TestCaseError::fail(format!("{context}: giant component shrank")));
    }
    Ok(())
}

/// Component sizes always partition the full node set.
pub(super) fn run_node_conservation_property(fixture: &SweepFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let criterion: Arc<str> = Arc::from(CRITERION);
    let weight: Arc<str> = Arc::from(WEIGHT);
    let table = EdgeTable::load(&graph, &criterion, &weight)
        .map_err(|error| TestCaseError::fail(format!("edge table rejected fixture: {error}")))?;
    for &threshold in &fixture.thresholds {
        let components = table.filter(threshold).components();
        let total: usize = components.sizes().iter().sum();
        if total != fixture.node_count || components.labels().len() != fixture.node_count {
            return Err(TestCaseError::fail(format!(
                "threshold {threshold}: sizes sum to {total}, expected {}",
                fixture.node_count
            )));
        }
    }
    Ok(())
}

/// Above the largest criterion every edge is included and the metrics stop
/// changing.
pub(super) fn run_full_inclusion_property(fixture: &SweepFixture) -> TestCaseResult {
    let Some(max) = fixture.max_criterion() else {
        return Ok(());
    };
    let report = run(fixture, ExecutionStrategy::Sequential, &[max + 0.5, max + 100.0])?;
    let [first, second] = report.results() else {
        return Err(TestCaseError::fail("expected two results"));
    };
    if first.included_edges() != fixture.edges.len() {
        return Err(TestCaseError::fail("not every edge was included"));
    }
    if first.component_count() != second.component_count()
        || first.giant_component_size() != second.giant_component_size()
        || first.mean_distance() != second.mean_distance()
    {
        return Err(TestCaseError::fail("metrics changed above the maximum"));
    }
    Ok(())
}

/// The parallel backend produces exactly the sequential report.
#[cfg(feature = "parallel")]
pub(super) fn run_strategy_equivalence_property(fixture: &SweepFixture) -> TestCaseResult {
    let sequential = run(fixture, ExecutionStrategy::Sequential, &fixture.thresholds)?;
    let parallel = run(fixture, ExecutionStrategy::Parallel, &fixture.thresholds)?;
    if sequential != parallel {
        return Err(TestCaseError::fail(format!(
            "parallel report diverged for {:?}",
            fixture.topology
        )));
    }
    Ok(())
}
