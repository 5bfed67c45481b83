//! Small helpers shared across CLI tests.
//!
//! The tests write a five-town network to temporary tables: four southern
//! towns on the `A -10- B -50- C -90- D` corridor plus a northern town `E`
//! joined to `D` by a five-minute border road.

use std::fs;
use std::io;
use std::path::PathBuf;

use percolate_core::SweepReport;
use tempfile::TempDir;

use super::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, OutputFormat, StrategyArg, SweepCommand,
    render_summary, run_cli,
};

pub(super) const NODES: &str = "\
id,region,population
A,South,1200
B,South,800
C,South,400
D,South,150
E,North,90
";

pub(super) const EDGES: &str = "\
from,to,time,length,border
A,B,10,100,false
B,C,50,500,false
C,D,90,900,false
D,E,5,50,true
";

/// Temporary directory holding a node table and an edge table.
pub(super) struct Tables {
    _dir: TempDir,
    pub(super) nodes: PathBuf,
    pub(super) edges: PathBuf,
}

impl Tables {
    pub(super) fn write(nodes: &str, edges: &str) -> io::Result<Self> {
        let dir = TempDir::new()?;
        let nodes_path = dir.path().join("towns.csv");
        let edges_path = dir.path().join("roads.csv");
        fs::write(&nodes_path, nodes)?;
        fs::write(&edges_path, edges)?;
        Ok(Self {
            _dir: dir,
            nodes: nodes_path,
            edges: edges_path,
        })
    }

    pub(super) fn corridor() -> io::Result<Self> {
        Self::write(NODES, EDGES)
    }

    pub(super) fn graph_args(&self, region: Option<&str>) -> GraphArgs {
        GraphArgs {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            region: region.map(ToOwned::to_owned),
            delimiter: b',',
            name: None,
        }
    }
}

/// Sweep over `time` with no thresholds, strategy or budget chosen yet.
pub(super) fn sweep_command(graph: GraphArgs) -> SweepCommand {
    SweepCommand {
        graph,
        criterion: "time".to_owned(),
        distance: None,
        thresholds: Vec::new(),
        start: 0.0,
        step: None,
        max: None,
        strategy: StrategyArg::Sequential,
        threads: None,
        time_budget_secs: None,
        format: OutputFormat::Tsv,
    }
}

pub(super) fn run_sweep_expecting_report(
    command: SweepCommand,
) -> Result<SweepReport, CliError> {
    match run_cli(Cli {
        command: Command::Sweep(command),
    })? {
        ExecutionSummary::Sweep { report, .. } => Ok(report),
        ExecutionSummary::Inspect(summary) => panic!("sweep produced an inspection: {summary:?}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render_to_string(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_summary(summary, &mut buffer) {
        panic!("rendering into memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output must be UTF-8: {err}"),
    }
}
