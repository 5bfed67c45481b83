use std::fmt;

use percolate_core::{GraphError, ParseNodeKindError};
use thiserror::Error;

/// Identifies which of the two input tables an error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableKind {
    /// The node table.
    Nodes,
    /// The edge table.
    Edges,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nodes => "node",
            Self::Edges => "edge",
        })
    }
}

/// Errors raised while reading node and edge tables.
///
/// Line numbers are 1-based and count the header row.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error("{table} table is empty; expected a header row")]
    MissingHeader { table: TableKind },
    #[error("{table} table has no `{column}` column")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },
    #[error("{table} table header repeats column `{column}`")]
    DuplicateColumn { table: TableKind, column: String },
    #[error("{table} table line {line}: expected {expected} fields but found {found}")]
    RaggedRow {
        table: TableKind,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{table} table line {line}: unterminated quoted field")]
    UnterminatedQuote { table: TableKind, line: usize },
    #[error("node table has no rows")]
    EmptyNodeTable,
    #[error("node table line {line}: column `{column}` value `{value}` is not a finite number")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("node table line {line}: coordinates need both `x` and `y`")]
    PartialCoordinates { line: usize },
    #[error("node table line {line}: {source}")]
    InvalidKind {
        line: usize,
        #[source]
        source: ParseNodeKindError,
    },
    #[error("{table} table line {line}: {source}")]
    Graph {
        table: TableKind,
        line: usize,
        #[source]
        source: GraphError,
    },
    #[error("failed to read {table} table: {source}")]
    Io {
        table: TableKind,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    /// Returns the 1-based line the error was found on, when it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::RaggedRow { line, .. }
            | Self::UnterminatedQuote { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::PartialCoordinates { line }
            | Self::InvalidKind { line, .. }
            | Self::Graph { line, .. } => Some(*line),
            Self::MissingColumn { .. } | Self::DuplicateColumn { .. } => Some(1),
            Self::MissingHeader { .. } | Self::EmptyNodeTable | Self::Io { .. } => None,
        }
    }
}
