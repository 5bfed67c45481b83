//! Command implementations and argument parsing for the percolate CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use percolate_core::{
    ExecutionStrategy, GraphSource, PercolationSweep, RoadGraph, SweepBuilder, SweepError,
    SweepReport, Thresholds,
};
use percolate_providers_tables::{TableError, TableGraphLoader};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Marker written in place of an undefined mean distance.
const UNDEFINED: &str = "NA";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "percolate",
    about = "Measure how a road network fragments as edges are removed by threshold."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a percolation sweep and print one row per threshold.
    Sweep(SweepCommand),
    /// Summarise the graph and its numeric edge attributes.
    Inspect(InspectCommand),
}

/// Node and edge tables to load, plus an optional region filter.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Node table with an `id` column.
    #[arg(long)]
    pub nodes: PathBuf,

    /// Edge table with `from` and `to` columns.
    #[arg(long)]
    pub edges: PathBuf,

    /// Keep only nodes whose `region` equals this value.
    #[arg(long)]
    pub region: Option<String>,

    /// Field separator: a single ASCII character, or `tab`.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Override name for the graph (defaults to the node table's file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Graph input.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Edge attribute compared against each threshold.
    #[arg(long)]
    pub criterion: String,

    /// Edge attribute used as the distance weight (defaults to the criterion).
    #[arg(long)]
    pub distance: Option<String>,

    /// Explicit threshold; repeat to sweep several, in the order given.
    #[arg(
        long = "threshold",
        allow_negative_numbers = true,
        conflicts_with_all = ["step", "max"],
    )]
    pub thresholds: Vec<f64>,

    /// First threshold of a stepped sweep.
    #[arg(long, default_value_t = 0.0, requires = "step")]
    pub start: f64,

    /// Increment between thresholds; requires `--max`.
    #[arg(long, requires = "max")]
    pub step: Option<f64>,

    /// Last threshold. Without `--step` every integer from 0 is swept.
    #[arg(long)]
    pub max: Option<f64>,

    /// Scheduling of threshold evaluations.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Worker thread cap for the parallel strategy.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Abandon the sweep after this many seconds.
    #[arg(long = "time-budget-secs")]
    pub time_budget_secs: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Graph input.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Execution strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, sequential otherwise.
    Auto,
    /// One threshold at a time.
    Sequential,
    /// Thresholds spread over worker threads.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Output formats for sweep results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated rows with a header line.
    Tsv,
    /// A single JSON document with the results and the three plot series.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading the node or edge table failed.
    #[error(transparent)]
    Table(#[from] TableError),
    /// Configuring or running the sweep failed.
    #[error(transparent)]
    Sweep(#[from] SweepError),
    /// The time budget was negative or not a number.
    #[error("time budget must be a non-negative number of seconds (got {secs})")]
    InvalidTimeBudget {
        /// The rejected value.
        secs: f64,
    },
}

/// Numeric edge attribute and its largest value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    /// Attribute name.
    pub name: String,
    /// Largest value across edges carrying it.
    pub max: f64,
}

/// Shape of a loaded graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    /// Graph name.
    pub name: String,
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Numeric edge attributes in name order.
    pub attributes: Vec<AttributeSummary>,
}

/// Outcome of executing a CLI command, ready to render.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A completed sweep and the format requested for it.
    Sweep {
        /// Per-threshold results.
        report: SweepReport,
        /// Requested output format.
        format: OutputFormat,
    },
    /// A graph inspection.
    Inspect(GraphSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the tables or running the sweep fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use percolate_cli::cli::{Cli, Command, ExecutionSummary, GraphArgs, InspectCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let nodes = dir.path().join("towns.csv");
/// let edges = dir.path().join("roads.csv");
/// std::fs::write(&nodes, "id\nA\nB\n")?;
/// std::fs::write(&edges, "from,to,time\nA,B,7.5\n")?;
/// let cli = Cli {
///     command: Command::Inspect(InspectCommand {
///         graph: GraphArgs { nodes, edges, region: None, delimiter: b',', name: None },
///     }),
/// };
/// let ExecutionSummary::Inspect(summary) = run_cli(cli)? else {
///     unreachable!("inspect yields a graph summary");
/// };
/// assert_eq!(summary.name, "towns");
/// assert_eq!(summary.attributes[0].max, 7.5);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Sweep(command) => {
            span.record("command", field::display("sweep"));
            run_sweep(command)
        }
        Command::Inspect(command) => {
            span.record("command", field::display("inspect"));
            run_inspect(&command).map(ExecutionSummary::Inspect)
        }
    }
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(
        criterion = %command.criterion,
        strategy = ?command.strategy,
        thresholds = field::Empty,
    ),
)]
pub(super) fn run_sweep(command: SweepCommand) -> Result<ExecutionSummary, CliError> {
    let graph = load_graph(&command.graph)?;
    let sweep = configure_sweep(&command)?;
    let thresholds = resolve_thresholds(&command, &graph)?;
    Span::current().record("thresholds", thresholds.len());

    let report = sweep.run(&graph, thresholds.as_slice())?;
    info!(
        graph = report.graph(),
        results = report.results().len(),
        "command completed"
    );
    Ok(ExecutionSummary::Sweep {
        report,
        format: command.format,
    })
}

fn configure_sweep(command: &SweepCommand) -> Result<PercolationSweep, CliError> {
    let mut builder = SweepBuilder::new()
        .with_criterion(command.criterion.as_str())
        .with_execution_strategy(command.strategy.into());
    if let Some(distance) = &command.distance {
        builder = builder.with_distance(distance.as_str());
    }
    if let Some(threads) = command.threads {
        builder = builder.with_max_threads(threads);
    }
    if let Some(secs) = command.time_budget_secs {
        let budget = Duration::try_from_secs_f64(secs)
            .map_err(|_| CliError::InvalidTimeBudget { secs })?;
        builder = builder.with_time_budget(budget);
    }
    Ok(builder.build()?)
}

/// Picks the thresholds: explicit values, then a stepped or integer range
/// ending at `--max`, then every integer up to the criterion's maximum.
pub(super) fn resolve_thresholds(
    command: &SweepCommand,
    graph: &RoadGraph,
) -> Result<Thresholds, CliError> {
    let thresholds = if !command.thresholds.is_empty() {
        Thresholds::from_values(command.thresholds.iter().copied())?
    } else {
        match (command.step, command.max) {
            (Some(step), Some(max)) => Thresholds::stepped(command.start, max, step)?,
            (None, Some(max)) => Thresholds::integers_through(max)?,
            (_, None) => Thresholds::for_attribute(graph, &command.criterion)?,
        }
    };
    Ok(thresholds)
}

#[instrument(name = "cli.inspect", err, skip(command))]
pub(super) fn run_inspect(command: &InspectCommand) -> Result<GraphSummary, CliError> {
    let graph = load_graph(&command.graph)?;
    let attributes = graph
        .numeric_attribute_names()
        .into_iter()
        .filter_map(|name| {
            graph.attribute_max(&name).map(|max| AttributeSummary {
                name: name.as_ref().to_owned(),
                max,
            })
        })
        .collect();
    Ok(GraphSummary {
        name: graph.name().to_owned(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        attributes,
    })
}

#[instrument(
    name = "cli.load_graph",
    err,
    skip(args),
    fields(
        nodes = %args.nodes.display(),
        edges = %args.edges.display(),
        region = field::Empty,
        delimiter = field::Empty,
    ),
)]
pub(super) fn load_graph(args: &GraphArgs) -> Result<RoadGraph, CliError> {
    let name = derive_graph_name(&args.nodes, args.name.as_deref());
    let loader = TableGraphLoader::new(name.as_str()).with_delimiter(args.delimiter);
    Span::current().record(
        "delimiter",
        field::display(char::from(loader.delimiter()).escape_default()),
    );
    let graph = loader.load_paths(&args.nodes, &args.edges)?;

    let Some(region) = args.region.as_deref() else {
        return Ok(graph);
    };
    Span::current().record("region", region);
    let subgraph = graph.induced_subgraph(format!("{name}:{region}"), |node| {
        node.attributes().region() == Some(region)
    });
    info!(
        kept_nodes = subgraph.node_count(),
        kept_edges = subgraph.edge_count(),
        "region filter applied"
    );
    Ok(subgraph)
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

pub(super) fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("tab") || raw == "\\t" {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character or `tab` (got `{raw}`)"
        )),
    }
}

/// Renders `summary` to `writer`.
///
/// Sweeps render as TSV or JSON according to their requested format; an
/// undefined mean distance is written as `NA` in TSV and `null` in JSON.
/// Inspections render as `key: value` lines followed by an attribute table.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use percolate_cli::cli::{ExecutionSummary, GraphSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Inspect(GraphSummary {
///     name: "demo".into(),
///     node_count: 2,
///     edge_count: 0,
///     attributes: Vec::new(),
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "graph: demo\nnodes: 2\nedges: 0\nattribute\tmax\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Sweep {
            report,
            format: OutputFormat::Tsv,
        } => render_tsv(report, &mut writer),
        ExecutionSummary::Sweep {
            report,
            format: OutputFormat::Json,
        } => {
            serde_json::to_writer_pretty(&mut writer, &report_json(report))?;
            writeln!(writer)
        }
        ExecutionSummary::Inspect(graph) => render_inspection(graph, &mut writer),
    }
}

fn render_tsv(report: &SweepReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "threshold\tgiant_component_size\tcomponent_count\tmean_distance\tincluded_edges"
    )?;
    for result in report.results() {
        write!(
            writer,
            "{}\t{}\t{}\t",
            result.threshold(),
            result.giant_component_size(),
            result.component_count()
        )?;
        match result.mean_distance() {
            Some(distance) => write!(writer, "{distance}")?,
            None => write!(writer, "{UNDEFINED}")?,
        }
        writeln!(writer, "\t{}", result.included_edges())?;
    }
    Ok(())
}

fn report_json(report: &SweepReport) -> Value {
    let results: Vec<Value> = report
        .results()
        .iter()
        .map(|result| {
            json!({
                "threshold": result.threshold(),
                "giant_component_size": result.giant_component_size(),
                "component_count": result.component_count(),
                "mean_distance": result.mean_distance(),
                "included_edges": result.included_edges(),
            })
        })
        .collect();
    json!({
        "graph": report.graph(),
        "criterion": report.criterion(),
        "distance": report.distance(),
        "node_count": report.node_count(),
        "edge_count": report.edge_count(),
        "results": results,
        "series": {
            "giant_component": report.giant_component_series(),
            "component_count": report.component_count_series(),
            "mean_distance": report.mean_distance_series(),
        },
    })
}

fn render_inspection(graph: &GraphSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", graph.name)?;
    writeln!(writer, "nodes: {}", graph.node_count)?;
    writeln!(writer, "edges: {}", graph.edge_count)?;
    writeln!(writer, "attribute\tmax")?;
    for attribute in &graph.attributes {
        writeln!(writer, "{}\t{}", attribute.name, attribute.max)?;
    }
    Ok(())
}
