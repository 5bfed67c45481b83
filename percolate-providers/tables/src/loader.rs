//! Node and edge table ingestion.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use percolate_core::{
    EdgeAttributes, GraphBuilder, NodeAttributes, NodeKind, RoadGraph,
};
use tracing::{debug, info, instrument};

use crate::{
    errors::{TableError, TableKind},
    parse::{Header, parse_cell, split_record},
};

/// Field separator used when none is configured.
pub const DEFAULT_DELIMITER: u8 = b',';

const ID: &str = "id";
const FROM: &str = "from";
const TO: &str = "to";
const POPULATION: &str = "population";
const REGION: &str = "region";
const COUNTRY: &str = "country";
const KIND: &str = "kind";
const X: &str = "x";
const Y: &str = "y";

/// Builds a [`RoadGraph`] from a node table and an edge table.
///
/// Both tables start with a header row. The node table needs an `id`
/// column and may carry `population`, `region`, `country`, `kind`, `x` and
/// `y`; other columns are ignored. The edge table needs `from` and `to`,
/// and every other column becomes an edge attribute. Blank lines are
/// skipped.
///
/// # Examples
/// ```
/// use percolate_core::{AttributeValue, GraphSource};
/// use percolate_providers_tables::TableGraphLoader;
///
/// let nodes = "id,region\nA,South\nB,South\nC,North\n";
/// let edges = "from,to,time,border\nA,B,12.5,false\nB,C,40,true\n";
/// let graph = TableGraphLoader::new("demo").load_readers(nodes.as_bytes(), edges.as_bytes())?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.attribute(1, "border")?, AttributeValue::Flag(true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct TableGraphLoader {
    name: Arc<str>,
    delimiter: u8,
}

impl TableGraphLoader {
    /// Creates a loader that names the resulting graph `name`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Sets the single-byte field separator.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the configured field separator.
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Loads the tables stored at `nodes` and `edges`.
    ///
    /// # Errors
    /// Returns [`TableError::Io`] when a file cannot be opened or read, and
    /// any error of [`TableGraphLoader::load_readers`].
    pub fn load_paths(
        &self,
        nodes: impl AsRef<Path>,
        edges: impl AsRef<Path>,
    ) -> Result<RoadGraph, TableError> {
        let nodes = open(nodes.as_ref(), TableKind::Nodes)?;
        let edges = open(edges.as_ref(), TableKind::Edges)?;
        self.load_readers(nodes, edges)
    }

    /// Loads the tables from buffered readers.
    ///
    /// # Errors
    /// Returns a [`TableError`] for a missing header or required column, a
    /// row with the wrong number of fields, an empty node table, a malformed
    /// node attribute, or a duplicate node or unknown edge endpoint.
    #[instrument(
        name = "tables.load",
        err,
        skip(self, nodes, edges),
        fields(graph = %self.name, delimiter = %char::from(self.delimiter)),
    )]
    pub fn load_readers<N: BufRead, E: BufRead>(
        &self,
        nodes: N,
        edges: E,
    ) -> Result<RoadGraph, TableError> {
        let mut builder = GraphBuilder::new(Arc::clone(&self.name));
        self.read_nodes(nodes, &mut builder)?;
        let edge_count = self.read_edges(edges, &mut builder)?;
        info!(nodes = builder.node_count(), edges = edge_count, "tables loaded");
        Ok(builder.build())
    }

    fn read_nodes<R: BufRead>(&self, reader: R, builder: &mut GraphBuilder) -> Result<(), TableError> {
        let table = TableKind::Nodes;
        let mut rows = Rows::new(reader, table, char::from(self.delimiter))?;
        let columns = NodeColumns::resolve(rows.header())?;
        while let Some((line, fields)) = rows.next_row()? {
            let attributes = columns.attributes(&fields, line)?;
            let id = field(&fields, columns.id);
            builder
                .add_node(id, attributes)
                .map_err(|source| TableError::Graph {
                    table,
                    line,
                    source,
                })?;
        }
        if builder.node_count() == 0 {
            return Err(TableError::EmptyNodeTable);
        }
        Ok(())
    }

    fn read_edges<R: BufRead>(
        &self,
        reader: R,
        builder: &mut GraphBuilder,
    ) -> Result<usize, TableError> {
        let table = TableKind::Edges;
        let mut rows = Rows::new(reader, table, char::from(self.delimiter))?;
        let from = rows.header().require(FROM, table)?;
        let to = rows.header().require(TO, table)?;
        let attribute_columns: Vec<(usize, Arc<str>)> = rows
            .header()
            .columns()
            .filter(|&(position, _)| position != from && position != to)
            .map(|(position, name)| (position, Arc::from(name)))
            .collect();
        debug!(attributes = attribute_columns.len(), "edge attribute columns resolved");

        let mut count = 0_usize;
        while let Some((line, fields)) = rows.next_row()? {
            let attributes: EdgeAttributes = attribute_columns
                .iter()
                .filter_map(|(position, name)| {
                    parse_cell(field(&fields, *position)).map(|value| (Arc::clone(name), value))
                })
                .collect();
            builder
                .add_edge(field(&fields, from), field(&fields, to), attributes)
                .map_err(|source| TableError::Graph {
                    table,
                    line,
                    source,
                })?;
            count += 1;
        }
        Ok(count)
    }
}

fn open(path: &Path, table: TableKind) -> Result<BufReader<File>, TableError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TableError::Io { table, source })
}

fn field(fields: &[String], position: usize) -> &str {
    fields.get(position).map_or("", String::as_str)
}

/// Header-checked row iterator over one table.
struct Rows<R> {
    lines: std::io::Lines<R>,
    header: Header,
    table: TableKind,
    delimiter: char,
    line: usize,
}

impl<R: BufRead> Rows<R> {
    fn new(reader: R, table: TableKind, delimiter: char) -> Result<Self, TableError> {
        let mut lines = reader.lines();
        let first = lines
            .next()
            .ok_or(TableError::MissingHeader { table })?
            .map_err(|source| TableError::Io { table, source })?;
        let columns = split_record(strip_line_end(&first), delimiter, table, 1)?;
        let header = Header::new(columns, table)?;
        Ok(Self {
            lines,
            header,
            table,
            delimiter,
            line: 1,
        })
    }

    fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the next non-blank row with its 1-based line number.
    fn next_row(&mut self) -> Result<Option<(usize, Vec<String>)>, TableError> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            let raw = raw.map_err(|source| TableError::Io {
                table: self.table,
                source,
            })?;
            let text = strip_line_end(&raw);
            if text.trim().is_empty() {
                continue;
            }
            let fields = split_record(text, self.delimiter, self.table, self.line)?;
            if fields.len() != self.header.len() {
                return Err(TableError::RaggedRow {
                    table: self.table,
                    line: self.line,
                    expected: self.header.len(),
                    found: fields.len(),
                });
            }
            return Ok(Some((self.line, fields)));
        }
        Ok(None)
    }
}

fn strip_line_end(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Positions of the recognised node columns.
struct NodeColumns {
    id: usize,
    population: Option<usize>,
    region: Option<usize>,
    country: Option<usize>,
    kind: Option<usize>,
    x: Option<usize>,
    y: Option<usize>,
}

impl NodeColumns {
    fn resolve(header: &Header) -> Result<Self, TableError> {
        Ok(Self {
            id: header.require(ID, TableKind::Nodes)?,
            population: header.position(POPULATION),
            region: header.position(REGION),
            country: header.position(COUNTRY),
            kind: header.position(KIND),
            x: header.position(X),
            y: header.position(Y),
        })
    }

    fn attributes(&self, fields: &[String], line: usize) -> Result<NodeAttributes, TableError> {
        let cell = |position: Option<usize>| {
            position
                .map(|position| field(fields, position))
                .filter(|value| !value.is_empty() && *value != "NA")
        };

        let mut attributes = NodeAttributes::default();
        if let Some(raw) = cell(self.population) {
            attributes = attributes.with_population(number(raw, POPULATION, line)?);
        }
        if let Some(region) = cell(self.region) {
            attributes = attributes.with_region(region);
        }
        if let Some(country) = cell(self.country) {
            attributes = attributes.with_country(country);
        }
        if let Some(raw) = cell(self.kind) {
            let kind = raw
                .parse::<NodeKind>()
                .map_err(|source| TableError::InvalidKind { line, source })?;
            attributes = attributes.with_kind(kind);
        }
        match (cell(self.x), cell(self.y)) {
            (Some(x), Some(y)) => {
                attributes = attributes.with_coordinates(number(x, X, line)?, number(y, Y, line)?);
            }
            (None, None) => {}
            _ => return Err(TableError::PartialCoordinates { line }),
        }
        Ok(attributes)
    }
}

fn number(raw: &str, column: &'static str, line: usize) -> Result<f64, TableError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TableError::InvalidNumber {
            line,
            column,
            value: raw.to_owned(),
        })
}
