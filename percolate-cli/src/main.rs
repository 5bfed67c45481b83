//! `percolate` binary.
//!
//! Sets up logging, runs the parsed command and writes its rendering to
//! stdout. A failed command is logged once, with the stable error codes
//! attached as fields, and the process exits with a failure status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Error};
use clap::Parser;
use percolate_cli::{
    cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn execute() -> anyhow::Result<()> {
    let summary = run_cli(Cli::parse()).context("failed to execute command")?;
    write_stdout(&summary)
}

fn write_stdout(summary: &ExecutionSummary) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render_summary(summary, &mut out).context("failed to render output")?;
    out.flush().context("failed to flush output")
}

/// Logs `err` with whichever stable identifiers its source carries.
fn log_failure(err: &Error) {
    let cause = err.downcast_ref::<CliError>();
    let sweep = match cause {
        Some(CliError::Sweep(sweep)) => Some(sweep),
        _ => None,
    };
    let line = match cause {
        Some(CliError::Table(table)) => table.line(),
        _ => None,
    };

    error!(
        error = %format!("{err:#}"),
        code = sweep.map(|sweep| field::display(sweep.code())),
        graph_source_code = sweep
            .and_then(|sweep| sweep.graph_source_code())
            .map(field::display),
        line,
        "command execution failed"
    );
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available when its own setup fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("percolate: cannot set up logging: {err}");
}
