//! Command-line interface orchestration for percolation sweeps.
//!
//! `sweep` loads a node table and an edge table, optionally restricts the
//! graph to one region, and runs a percolation sweep over the requested
//! thresholds. `inspect` reports the graph's size and the range of its
//! numeric edge attributes, which helps pick a criterion and thresholds.

mod commands;

pub use commands::{
    AttributeSummary, Cli, CliError, Command, ExecutionSummary, GraphArgs, GraphSummary,
    InspectCommand, OutputFormat, StrategyArg, SweepCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
