//! Library half of the `percolate` binary: argument parsing, command
//! execution, output rendering and logging setup.

pub mod cli;
pub mod logging;
