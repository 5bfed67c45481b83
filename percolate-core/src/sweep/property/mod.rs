//! Property-based tests for the percolation sweep.
//!
//! Checks the sweep against a Floyd-Warshall oracle, verifies the monotone
//! behaviour expected over ascending thresholds, and confirms that the
//! scheduling strategy never changes the report.

mod invariants;
mod oracle;
mod strategies;
mod types;
